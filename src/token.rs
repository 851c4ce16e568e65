//! Tokens and a tokenizer for single lines of C source.

use logos::{Lexer, Logos, Skip};

use std::ops::Range;

/// Byte range of a token inside the line it was lexed from.
pub type Span = Range<usize>;

/// Enumeration of the tokens the translator distinguishes.
///
/// Only the handful of shapes the translation rules look at get their own variant. Every other
/// punctuator ends up in [Token::Operator] and any character the lexer does not understand
/// becomes [Token::Error], so lexing a line never fails.
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum Token<'a> {
    /// Character that could not be interpreted as any of the other variants.
    #[error]
    #[regex(r"[ \n\t\r\f]+", logos::skip)]
    #[regex(r"//[^\n]*", logos::skip)]
    #[token("/*", block_comment)]
    Error,

    /// The `int` keyword.
    #[token("int")]
    Int,

    /// The `return` keyword.
    #[token("return")]
    Return,

    /// An identifier which begins with a letter or an underscore.
    #[regex("[A-Za-z_][A-Za-z0-9_]*", Lexer::slice)]
    Identifier(&'a str),

    /// A signed decimal number literal that fits an `i32`.
    #[regex("-?[0-9]+", literal_callback)]
    Literal(i32),

    /// A string literal. Holds the text between the quotes with escapes left untouched.
    #[regex(r#""([^"\\\n]|\\.)*""#, string_callback)]
    StringLiteral(&'a str),

    /// `=`
    #[token("=")]
    Assign,

    /// `,`
    #[token(",")]
    Comma,

    /// `;`
    #[token(";")]
    Semicolon,

    /// `&`, as in `&x`.
    #[token("&")]
    Ampersand,

    /// `(`
    #[token("(")]
    ParenOpen,

    /// `)`
    #[token(")")]
    ParenClose,

    /// Any other operator or punctuator.
    #[regex(r"==|!=|<=|>=|\+=|-=|\*=|/=|%=|<<|>>|\+\+|--|&&|\|\||->|[-+*/%<>!~^|{}\[\]?:.]", Lexer::slice)]
    Operator(&'a str),
}

/// Skips the rest of a `/* ... */` comment. An unterminated comment runs to the end of the line.
fn block_comment<'a>(lex: &mut Lexer<'a, Token<'a>>) -> Skip {
    let len = match lex.remainder().find("*/") {
        Some(end) => end + 2,
        None => lex.remainder().len(),
    };

    lex.bump(len);
    Skip
}

fn literal_callback<'a>(lex: &mut Lexer<'a, Token<'a>>) -> Option<i32> {
    lex.slice().parse().ok()
}

fn string_callback<'a>(lex: &mut Lexer<'a, Token<'a>>) -> &'a str {
    let slice = lex.slice();
    &slice[1..slice.len() - 1]
}

/// A single line of source text together with its tokens.
#[derive(Debug, Clone)]
pub struct SourceLine<'a> {
    /// The line exactly as it appeared in the input.
    pub raw: &'a str,

    /// Tokens of the line paired with their spans in `raw`. Comments are not included.
    pub tokens: Vec<(Token<'a>, Span)>,
}

impl<'a> SourceLine<'a> {
    /// Lexes a line. Returns `None` for lines that carry nothing to translate: blank lines,
    /// comment-only lines and preprocessor lines.
    pub fn lex(raw: &'a str) -> Option<SourceLine<'a>> {
        if raw.trim_start().starts_with('#') {
            return None;
        }

        let tokens: Vec<_> = Token::lexer(raw).spanned().collect();

        if tokens.is_empty() {
            return None;
        }

        Some(SourceLine { raw, tokens })
    }

    /// Returns the source text covered by a run of this line's tokens.
    pub fn text(&self, tokens: &[(Token<'a>, Span)]) -> &'a str {
        match (tokens.first(), tokens.last()) {
            (Some((_, first)), Some((_, last))) => {
                let raw: &'a str = self.raw;
                &raw[first.start..last.end]
            }
            _ => "",
        }
    }

    /// Whether any token of the line is `token`.
    pub fn contains(&self, token: &Token) -> bool {
        self.tokens.iter().any(|(t, _)| t == token)
    }
}
