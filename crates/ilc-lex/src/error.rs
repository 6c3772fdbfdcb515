//! Lexical errors (spec §7).

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LexError {
    #[error("unrecognized character {ch:?} on line {line}")]
    UnrecognizedCharacter { ch: char, line: u32 },
}
