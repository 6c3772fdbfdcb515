//! ilc-lex - the tokenizer (spec §4.1).
//!
//! Converts source text into the closed set of tokens spec §6.3 defines.
//! Single pass, one character of lookahead via [`Cursor`], fatal on the
//! first unrecognized character (spec §7) rather than collecting multiple
//! lexical errors.

mod cursor;
mod error;
mod lexer;
mod token;

pub use cursor::Cursor;
pub use error::LexError;
pub use lexer::tokenize;
pub use token::{bin_precedence, keyword_from_word, Token, TokenKind};
