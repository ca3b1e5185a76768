use std::hash::BuildHasherDefault;

use indexmap::IndexSet;
use rustc_hash::FxHasher;

/// Handle to a string owned by a [StringInterner].
///
/// Handles are cheap to copy and compare, and are only meaningful for the
/// interner that produced them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Sym(u32);

/// Deduplicating string storage.
///
/// Interning the same text twice yields the same [Sym], so a symbol table
/// stores each function name or file path once, no matter how many PCs
/// share it.
#[derive(Debug, Default)]
pub struct StringInterner {
    strings: IndexSet<Box<str>, BuildHasherDefault<FxHasher>>,
}

impl StringInterner {
    /// Creates an empty interner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns the given text, returning its handle.
    ///
    /// Equal text always maps to the same handle. Interned text is never
    /// removed, except by [clear](Self::clear).
    pub fn intern(&mut self, text: &str) -> Sym {
        let index = match self.strings.get_index_of(text) {
            Some(index) => index,
            None => self.strings.insert_full(Box::from(text)).0,
        };

        Sym(index as u32)
    }

    /// Resolves a handle previously returned by [intern](Self::intern).
    ///
    /// # Panics
    ///
    /// Panics if the handle comes from another interner, or was produced
    /// before the last call to [clear](Self::clear).
    pub fn resolve(&self, sym: Sym) -> &str {
        &self.strings[sym.0 as usize]
    }

    /// Returns the number of interned strings.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Returns whether no string is interned.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Discards every interned string, invalidating all previously returned
    /// handles.
    pub fn clear(&mut self) {
        self.strings.clear();
    }
}
