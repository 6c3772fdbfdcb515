//! ilc-util - shared foundation types for the ilc compiler.
//!
//! Everything here is leaf-level: no crate in this workspace depends on
//! `ilc-lex`, `ilc-par`, `ilc-gen`, or `ilc-drv` from inside `ilc-util`,
//! matching the dependency order spec §2 lays out (token kinds → AST node
//! kinds → Tokenizer → Parser → Generator). This crate provides the pieces
//! every later stage needs: an interned identifier type, a diagnostic
//! shape, and the arena the parser allocates the AST from.

mod arena;
mod diagnostic;
mod symbol;

pub use arena::Arena;
pub use diagnostic::{Diagnostic, Level};
pub use symbol::{Interner, Symbol};
