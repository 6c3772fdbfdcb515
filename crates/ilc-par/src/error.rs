//! Parse errors (spec §7).

use ilc_lex::TokenKind;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected {expected} on line {line}")]
    Expected { expected: &'static str, line: u32 },

    #[error("expected {expected} but reached end of input")]
    UnexpectedEof { expected: &'static str },

    #[error("invalid statement on line {line}")]
    InvalidStatement { line: u32 },

    #[error("invalid expression on line {line}")]
    InvalidExpression { line: u32 },
}

impl ParseError {
    pub fn expected(kind: TokenKind, line: u32) -> Self {
        ParseError::Expected {
            expected: kind.describe(),
            line,
        }
    }
}
