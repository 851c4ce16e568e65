//! Classifying source lines into the statement shapes the translator understands.
//!
//! Classification looks at the tokens of a single line only. The shapes are tried in a fixed
//! order and the first one that matches decides the [Statement]; shapes that are recognized by
//! their leading tokens but have unsupported details still classify as that statement, carrying
//! the reason in the variant.

use std::fmt;

use crate::format::{self, FormatString};
use crate::token::{SourceLine, Span, Token};

type Tokens<'l, 'a> = &'l [(Token<'a>, Span)];

/// The right hand side of an assignment, an initializer or a return statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand<'a> {
    /// A decimal integer literal.
    Literal(i32),
    /// A single identifier.
    Variable(&'a str),
    /// Anything else, as written in the source.
    Expression(&'a str),
}

/// One comma separated part of a declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum Declarator<'a> {
    /// `int x;`
    Bare(&'a str),
    /// `int x = <operand>;`
    Initialized { name: &'a str, value: Operand<'a> },
    /// Anything that is not a plain name, such as `a[10]` or `f(int n)`.
    Malformed(&'a str),
}

/// Reason why a `scanf` or `printf` call was not recognized.
#[derive(Debug, Clone, PartialEq)]
pub enum CallError {
    /// The arguments do not have the required shape.
    Shape,
    /// The format string is not the supported one.
    Format(String),
}

impl fmt::Display for CallError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CallError::Shape => write!(f, "unsupported argument shape"),
            CallError::Format(reason) => write!(f, "unsupported format: {}", reason),
        }
    }
}

/// A recognized `printf("%d...", x)` call.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintCall<'a> {
    pub variable: &'a str,
    /// Whether the text after the conversion contains a `\n` escape.
    pub newline: bool,
}

/// The translation rule a line falls under.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Rule {
    Declaration,
    Assignment,
    Return,
    Input,
    Output,
    Fallback,
    /// Matched by the [canned lookup](crate::canned).
    Canned,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement<'a> {
    /// `int a, b = 1;`
    Declaration(Vec<Declarator<'a>>),
    /// `x = <operand>;`
    Assignment { target: &'a str, value: Operand<'a> },
    /// `return <operand>;`
    Return(Operand<'a>),
    /// A line calling `scanf`. Holds the variable read into, if the call has the supported shape.
    Scanf(Result<&'a str, CallError>),
    /// A line calling `printf`.
    Printf(Result<PrintCall<'a>, CallError>),
    /// None of the above.
    Untranslated,
}

impl<'a> Statement<'a> {
    pub fn rule(&self) -> Rule {
        match self {
            Statement::Declaration(_) => Rule::Declaration,
            Statement::Assignment { .. } => Rule::Assignment,
            Statement::Return(_) => Rule::Return,
            Statement::Scanf(_) => Rule::Input,
            Statement::Printf(_) => Rule::Output,
            Statement::Untranslated => Rule::Fallback,
        }
    }

    /// Classifies a lexed line. The first matching shape wins.
    pub fn classify(line: &SourceLine<'a>) -> Statement<'a> {
        declaration(line)
            .or_else(|| assignment(line))
            .or_else(|| return_statement(line))
            .or_else(|| scanf(line))
            .or_else(|| printf(line))
            .unwrap_or(Statement::Untranslated)
    }
}

/// Drops a trailing `;` token.
fn strip_semicolon<'l, 'a>(tokens: Tokens<'l, 'a>) -> Tokens<'l, 'a> {
    match tokens.split_last() {
        Some(((Token::Semicolon, _), rest)) => rest,
        _ => tokens,
    }
}

fn operand<'a>(line: &SourceLine<'a>, tokens: Tokens<'_, 'a>) -> Operand<'a> {
    match tokens {
        [(Token::Literal(value), _)] => Operand::Literal(*value),
        [(Token::Identifier(name), _)] => Operand::Variable(*name),
        _ => Operand::Expression(line.text(tokens)),
    }
}

fn declaration<'a>(line: &SourceLine<'a>) -> Option<Statement<'a>> {
    match line.tokens.as_slice() {
        [(Token::Int, _), (Token::Identifier(_), _), ..] if line.contains(&Token::Semicolon) => (),
        _ => return None,
    }

    let declarators = strip_semicolon(&line.tokens[1..])
        .split(|(token, _)| *token == Token::Comma)
        .filter(|part| !part.is_empty())
        .map(|part| match part {
            [(Token::Identifier(name), _)] => Declarator::Bare(*name),
            [(Token::Identifier(name), _), (Token::Assign, _), value @ ..] if !value.is_empty() => {
                Declarator::Initialized {
                    name: *name,
                    value: operand(line, value),
                }
            }
            _ => Declarator::Malformed(line.text(part)),
        })
        .collect();

    Some(Statement::Declaration(declarators))
}

fn assignment<'a>(line: &SourceLine<'a>) -> Option<Statement<'a>> {
    match line.tokens.as_slice() {
        [(Token::Identifier(target), _), (Token::Assign, _), rest @ ..] => {
            Some(Statement::Assignment {
                target: *target,
                value: operand(line, strip_semicolon(rest)),
            })
        }
        _ => None,
    }
}

fn return_statement<'a>(line: &SourceLine<'a>) -> Option<Statement<'a>> {
    match line.tokens.as_slice() {
        [(Token::Return, _), rest @ ..] => {
            let expression = strip_semicolon(rest);

            if expression.is_empty() {
                return None;
            }

            Some(Statement::Return(operand(line, expression)))
        }
        _ => None,
    }
}

/// Start indices of the calls to `function` on the line.
fn calls(line: &SourceLine, function: &str) -> Vec<usize> {
    line.tokens.windows(2)
        .enumerate()
        .filter(|(_, pair)| match pair {
            [(Token::Identifier(name), _), (Token::ParenOpen, _)] => *name == function,
            _ => false,
        })
        .map(|(index, _)| index)
        .collect()
}

fn scanf<'a>(line: &SourceLine<'a>) -> Option<Statement<'a>> {
    let mut result = None;

    for start in calls(line, "scanf") {
        let attempt = match &line.tokens[start + 2..] {
            [
                (Token::StringLiteral(fmt), _),
                (Token::Comma, _),
                (Token::Ampersand, _),
                (Token::Identifier(variable), _),
                (Token::ParenClose, _),
                ..
            ] => match FormatString::parse(fmt) {
                Ok(ref format) if format.is_exactly('d') => Ok(*variable),
                Ok(_) => Err(CallError::Format(format!("\"{}\" is not \"%d\"", fmt))),
                Err(err) => Err(CallError::Format(err.to_string())),
            },
            _ => Err(CallError::Shape),
        };

        if attempt.is_ok() {
            return Some(Statement::Scanf(attempt));
        }

        result.get_or_insert(attempt);
    }

    result.map(Statement::Scanf)
}

fn printf<'a>(line: &SourceLine<'a>) -> Option<Statement<'a>> {
    let mut result = None;

    for start in calls(line, "printf") {
        let attempt = match &line.tokens[start + 2..] {
            [
                (Token::StringLiteral(fmt), _),
                (Token::Comma, _),
                (Token::Identifier(variable), _),
                (Token::ParenClose, _),
                ..
            ] => FormatString::parse(fmt)
                .and_then(|format| {
                    let rest = format.after_leading('d')?;

                    Ok(PrintCall {
                        variable: *variable,
                        newline: format::has_newline(rest),
                    })
                })
                .map_err(|err| CallError::Format(err.to_string())),
            _ => Err(CallError::Shape),
        };

        if attempt.is_ok() {
            return Some(Statement::Printf(attempt));
        }

        result.get_or_insert(attempt);
    }

    result.map(Statement::Printf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(raw: &str) -> Statement {
        let line = SourceLine::lex(raw).expect("line should not be skipped");
        Statement::classify(&line)
    }

    #[test]
    fn test_declaration() {
        assert_eq!(classify("int i, res = 1;"), Statement::Declaration(vec![
            Declarator::Bare("i"),
            Declarator::Initialized { name: "res", value: Operand::Literal(1) },
        ]));

        assert_eq!(classify("int c = a + b;"), Statement::Declaration(vec![
            Declarator::Initialized { name: "c", value: Operand::Expression("a + b") },
        ]));

        assert_eq!(classify("int arr[10], n;"), Statement::Declaration(vec![
            Declarator::Malformed("arr[10]"),
            Declarator::Bare("n"),
        ]));

        assert_eq!(classify("int a, , b, ;"), Statement::Declaration(vec![
            Declarator::Bare("a"),
            Declarator::Bare("b"),
        ]));
    }

    #[test]
    fn test_declaration_needs_semicolon() {
        assert_eq!(classify("int main() {"), Statement::Untranslated);
        assert_eq!(classify("int factorial(int n) {"), Statement::Untranslated);
    }

    #[test]
    fn test_assignment() {
        assert_eq!(
            classify("x = 5;"),
            Statement::Assignment { target: "x", value: Operand::Literal(5) },
        );
        assert_eq!(
            classify("  x = y; // copy"),
            Statement::Assignment { target: "x", value: Operand::Variable("y") },
        );
        assert_eq!(
            classify("res = res * i;"),
            Statement::Assignment { target: "res", value: Operand::Expression("res * i") },
        );
        assert_eq!(classify("x += 1;"), Statement::Untranslated);
    }

    #[test]
    fn test_return() {
        assert_eq!(classify("return 0;"), Statement::Return(Operand::Literal(0)));
        assert_eq!(classify("return res;"), Statement::Return(Operand::Variable("res")));
        assert_eq!(classify("return a + b;"), Statement::Return(Operand::Expression("a + b")));
        assert_eq!(classify("return;"), Statement::Untranslated);
    }

    #[test]
    fn test_scanf() {
        assert_eq!(classify(r#"scanf("%d", &x);"#), Statement::Scanf(Ok("x")));
        assert_eq!(classify(r#"scanf("%d", x);"#), Statement::Scanf(Err(CallError::Shape)));
        assert_eq!(classify(r#"if (scanf("%d", &n) != 1) {"#), Statement::Scanf(Ok("n")));

        match classify(r#"scanf("%i", &x);"#) {
            Statement::Scanf(Err(CallError::Format(_))) => (),
            other => panic!("unexpected classification: {:?}", other),
        }
    }

    #[test]
    fn test_printf() {
        assert_eq!(
            classify(r#"printf("%d\n", x);"#),
            Statement::Printf(Ok(PrintCall { variable: "x", newline: true })),
        );
        assert_eq!(
            classify(r#"printf("%d", x);"#),
            Statement::Printf(Ok(PrintCall { variable: "x", newline: false })),
        );
        assert_eq!(
            classify(r#"printf("%d\n", factorial(x));"#),
            Statement::Printf(Err(CallError::Shape)),
        );

        match classify(r#"printf("x = %d\n", x);"#) {
            Statement::Printf(Err(CallError::Format(_))) => (),
            other => panic!("unexpected classification: {:?}", other),
        }
    }

    #[test]
    fn test_precedence() {
        // An assignment whose value is a call is still an assignment.
        assert_eq!(
            classify(r#"n = scanf("%d", &x);"#).rule(),
            Rule::Assignment,
        );
        assert_eq!(classify("for (i = 2; i <= n; i++) {").rule(), Rule::Fallback);
    }
}
