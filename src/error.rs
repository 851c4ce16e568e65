//! Error types for the internal parsers.
//!
//! The translator itself never fails. Parsers used while matching a line (such as the
//! [format string parser](crate::format)) report a [ParseError], which the translator logs and
//! turns into an "unsupported" marker line.

use std::fmt::{self, Display};
use nom::error::ErrorKind;

#[derive(Debug, Clone, PartialEq)]
enum InnerError<Kind> {
    Context(&'static str),
    Other(Kind),
    Nom(ErrorKind),
}

impl<Kind: Display> fmt::Display for InnerError<Kind> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InnerError::Context(ctx) => write!(f, "invalid {}", ctx),
            InnerError::Nom(_err) => write!(f, "unexpected input"),
            InnerError::Other(kind) => fmt::Display::fmt(kind, f),
        }
    }
}

/// Error type that contains the reason of the error and the unconsumed input.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseError<Kind> {
    stack: Vec<(String, InnerError<Kind>)>,
}

impl<Kind> ParseError<Kind> {
    pub(crate) fn from_kind(input: &str, kind: Kind) -> ParseError<Kind> {
        ParseError {
            stack: vec![(input.to_string(), InnerError::Other(kind))],
        }
    }
}

impl<Kind: Display> fmt::Display for ParseError<Kind> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (input, kind) = match self.stack.first() {
            Some(entry) => entry,
            None => return write!(f, "unknown error"),
        };

        let rest: String = input.chars()
            .take_while(|c| *c != '\n')
            .take(20)
            .collect();

        write!(f, "{} at: '{}'", kind, rest)
    }
}

impl<Kind> nom::error::ParseError<&str> for ParseError<Kind> {
    fn from_error_kind(input: &str, kind: ErrorKind) -> Self {
        ParseError {
            stack: vec![(input.to_string(), InnerError::Nom(kind))],
        }
    }

    fn append(input: &str, kind: ErrorKind, mut other: Self) -> Self {
        other.stack.push((input.to_string(), InnerError::Nom(kind)));
        other
    }

    fn add_context(input: &str, ctx: &'static str, mut other: Self) -> Self {
        other.stack.push((input.to_string(), InnerError::Context(ctx)));
        other
    }
}

#[test]
fn test_parse_error_display() {
    #[derive(Debug, Clone, PartialEq)]
    struct Oops;

    impl Display for Oops {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "oops")
        }
    }

    let source = "%d and then some more text that is long";
    let error = ParseError::from_kind(&source[2..], Oops);

    assert_eq!(error.to_string(), "oops at: ' and then some more '");
}
