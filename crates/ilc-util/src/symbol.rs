//! String interning.
//!
//! Identifiers are interned so that equality and hashing are O(1) instead of
//! O(length): the tokenizer interns each identifier lexeme once, and the
//! generator's lexical environment (a linear `Vec<Binding>`, not a map — see
//! `ilc_par`'s module docs) compares `Symbol`s instead of `String`s when it
//! looks a name up.
//!
//! Unlike a production, multi-crate-session interner (compare
//! `faxc_util::StringTable`, which wraps its table in `Arc<RwLock<..>>` for
//! concurrent use across threads), a single compilation of this language is
//! strictly single-threaded (spec §5), so the table here is a plain
//! `RefCell`-free owned struct: one `Interner` per `Session`, no locking.

use rustc_hash::FxHashMap;
use std::fmt;

/// An interned string: a 4-byte handle into an [`Interner`]'s table.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.0)
    }
}

/// Owns the strings a compilation has interned.
///
/// Strings are never removed once interned (leak-for-the-session strategy,
/// the same trade-off `faxc_util::StringTable` makes): a single source file
/// has a bounded number of distinct identifiers, so there is nothing to
/// reclaim before the `Interner` itself is dropped at the end of
/// compilation.
#[derive(Default)]
pub struct Interner {
    index: FxHashMap<Box<str>, Symbol>,
    strings: Vec<Box<str>>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `text`, returning its (possibly freshly allocated) symbol.
    pub fn intern(&mut self, text: &str) -> Symbol {
        if let Some(&sym) = self.index.get(text) {
            return sym;
        }
        let sym = Symbol(self.strings.len() as u32);
        let owned: Box<str> = text.into();
        self.strings.push(owned.clone());
        self.index.insert(owned, sym);
        sym
    }

    /// Resolve a symbol back to its string.
    ///
    /// # Panics
    ///
    /// Panics if `sym` was not produced by this `Interner`.
    pub fn resolve(&self, sym: Symbol) -> &str {
        &self.strings[sym.0 as usize]
    }
}
