//! Code generation errors (spec §7).

use thiserror::Error;

/// Spec §4.3 gives two separate literal diagnostics for the two ways an
/// identifier can go unfound: `"Identifier does not exist"` for a read
/// (Term lowering) and `"Undeclared Identifier"` for an Assign target —
/// they are not the same failure re-rendered twice.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenError {
    #[error("identifier does not exist: {name} on line {line}")]
    UndeclaredRead { name: String, line: u32 },

    #[error("undeclared identifier: {name} on line {line}")]
    UndeclaredAssign { name: String, line: u32 },

    #[error("identifier already declared: {name} on line {line}")]
    DuplicateBinding { name: String, line: u32 },
}
