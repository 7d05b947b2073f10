//! Simple arena allocator for HIR data structures.
//!
//! The arena hands out stable identifiers so semantic passes can refer to HIR
//! nodes without cloning large structures. Entries are never removed, which
//! keeps every identifier valid while passes move nodes between blocks.

use std::fmt;
use std::marker::PhantomData;

use super::ids::ArenaId;

/// Append-only storage keyed by the identifier type `I`.
pub struct Arena<I, T> {
    entries: Vec<T>,
    _marker: PhantomData<fn() -> I>,
}

impl<I: ArenaId, T> Arena<I, T> {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Allocate a new value in the arena and return its identifier.
    pub fn alloc(&mut self, value: T) -> I {
        let id = I::from_index(self.entries.len());
        self.entries.push(value);
        id
    }

    /// Borrow the value stored under `id`.
    pub fn get(&self, id: I) -> Option<&T> {
        self.entries.get(id.index())
    }

    /// Mutably borrow the value stored under `id`.
    pub fn get_mut(&mut self, id: I) -> Option<&mut T> {
        self.entries.get_mut(id.index())
    }

    /// Iterate over `(id, value)` pairs in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (I, &T)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, value)| (I::from_index(index), value))
    }

    /// Identifiers of every allocated entry, in allocation order.
    pub fn ids(&self) -> impl Iterator<Item = I> + use<I, T> {
        (0..self.entries.len()).map(I::from_index)
    }

    /// Number of elements currently allocated in the arena.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the arena contains no elements.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<I: ArenaId, T> Default for Arena<I, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, T: fmt::Debug> fmt::Debug for Arena<I, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.iter()).finish()
    }
}
