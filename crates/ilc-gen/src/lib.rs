//! ilc-gen - the code generator (spec §4.3).
//!
//! Lowers a parsed [`ilc_par::Program`] to x86-64 NASM-syntax assembly over
//! an explicit evaluation stack, tracking a linear (vector, not map)
//! lexical environment of bindings and a stack of scope marks.

mod error;
mod generator;

pub use error::GenError;
pub use generator::{generate, Generator};
