//! Parsing the body of C format string literals.
//!
//! Only enough of the `printf`/`scanf` format language is understood to tell the conversions
//! apart from escapes and plain text. Flags, widths and length modifiers are not recognized: the
//! character after a `%` is taken as the conversion.

use std::fmt;
use std::result::Result as StdResult;

use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{anychar, char},
    combinator::{all_consuming, map},
    multi::many0,
    sequence::preceded,
};

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    /// The format does not start with the conversion the caller required.
    MissingConversion(char),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorKind::MissingConversion(c) => write!(f, "expected a leading %{} conversion", c),
        }
    }
}

pub type ParseError = crate::error::ParseError<ErrorKind>;
type Result<'a, T> = IResult<&'a str, T, ParseError>;

/// A part of a format string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Piece<'a> {
    /// `%` followed by a conversion character. `%%` is `Conversion('%')`.
    Conversion(char),
    /// `\` followed by the escaped character, for example `Escape('n')` for `\n`.
    Escape(char),
    /// Text printed as is.
    Text(&'a str),
}

/// A parsed format string.
#[derive(Debug, Clone, PartialEq)]
pub struct FormatString<'a> {
    pub source: &'a str,
    pub pieces: Vec<Piece<'a>>,
}

fn conversion(input: &str) -> Result<Piece> {
    map(preceded(char('%'), anychar), Piece::Conversion)(input)
}

fn escape(input: &str) -> Result<Piece> {
    map(preceded(char('\\'), anychar), Piece::Escape)(input)
}

fn text(input: &str) -> Result<Piece> {
    map(take_while1(|c: char| c != '%' && c != '\\'), Piece::Text)(input)
}

/// A `%` or `\` at the very end of the string.
fn dangling(input: &str) -> Result<Piece> {
    map(alt((tag("%"), tag("\\"))), Piece::Text)(input)
}

impl<'a> FormatString<'a> {
    /// Parses the text between the quotes of a format string literal.
    pub fn parse(source: &'a str) -> StdResult<FormatString<'a>, ParseError> {
        let parsed = all_consuming(many0(alt((conversion, escape, text, dangling))))(source);

        match parsed {
            Ok((_, pieces)) => Ok(FormatString { source, pieces }),
            Err(nom::Err::Error(err)) | Err(nom::Err::Failure(err)) => Err(err),
            Err(nom::Err::Incomplete(_)) => unreachable!("complete parsers never ask for more input"),
        }
    }

    /// Checks that the format starts with the conversion `%c` and returns the pieces after it.
    pub fn after_leading(&self, conversion: char) -> StdResult<&[Piece<'a>], ParseError> {
        match self.pieces.split_first() {
            Some((Piece::Conversion(c), rest)) if *c == conversion => Ok(rest),
            _ => Err(ParseError::from_kind(self.source, ErrorKind::MissingConversion(conversion))),
        }
    }

    /// Whether the format consists of the single conversion `%c` and nothing else.
    pub fn is_exactly(&self, conversion: char) -> bool {
        self.pieces == [Piece::Conversion(conversion)]
    }
}

/// Whether any of the pieces is the `\n` escape.
pub fn has_newline(pieces: &[Piece]) -> bool {
    pieces.contains(&Piece::Escape('n'))
}
