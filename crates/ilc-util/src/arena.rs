//! The AST bulk-allocation region.
//!
//! Spec §9 calls for "a typed arena ... for locality and to give the AST a
//! single well-defined lifetime boundary", generalizing the reference
//! `ArenaAllocator` (`examples/original_source/src/arena.hpp`): a fixed
//! buffer, bump-allocated, freed all at once. In Rust, `bumpalo::Bump` is
//! exactly that allocator (it's what `faxc_util::StringTable` and
//! `logicaffeine-language` reach for); we wrap it in a thin newtype so the
//! rest of the crate has one name (`Arena`) and one entry point (`alloc`)
//! to depend on, instead of depending on `bumpalo` directly everywhere.

/// Bump-allocates AST nodes for a single compilation.
///
/// Every node the parser builds — every `Term`, `Expr`, `Stmt`, `Scope`,
/// `IfPred` — is allocated here and lives exactly as long as the `Arena`
/// does. There are no per-node destructors to run (spec §5): the whole
/// region is reclaimed in one deallocation when the `Arena` is dropped.
#[derive(Default)]
pub struct Arena {
    bump: bumpalo::Bump,
}

impl Arena {
    /// Create an arena with a starting capacity on the order of a few
    /// megabytes, matching the reference `ArenaAllocator`'s fixed byte
    /// budget; unlike the reference's `malloc`-once buffer, `bumpalo` grows
    /// by allocating additional chunks if a compilation's AST outgrows the
    /// first one, so this is a hint, not a hard ceiling.
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bump: bumpalo::Bump::with_capacity(bytes),
        }
    }

    /// Move `value` into the arena and return a reference with the arena's
    /// lifetime.
    pub fn alloc<T>(&self, value: T) -> &T {
        self.bump.alloc(value)
    }

    /// Copy `items` into the arena as a contiguous slice — how `Scope` and
    /// `Program` store their statement lists (spec §3.2: a `Scope` holds an
    /// ordered list of statements, not a linked chain).
    pub fn alloc_slice<T: Copy>(&self, items: &[T]) -> &[T] {
        self.bump.alloc_slice_copy(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocated_values_round_trip() {
        let arena = Arena::with_capacity(1024);
        let a = arena.alloc(41i64);
        let b = arena.alloc(*a + 1);
        assert_eq!(*b, 42);
    }
}
