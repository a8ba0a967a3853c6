//! Typed handles into a [`Pool`](crate::Pool).

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Opaque reference to a value stored in a [`Pool`](crate::Pool).
///
/// A handle names an arena and a slot inside it, stamped with the identity
/// of the pool that issued it and the generation of the slot at the time of
/// allocation. Releasing the slot bumps its generation, so a released handle
/// is stale and every lookup through it fails. A handle is only ever
/// dereferenced through a borrow of its pool, and `Pool::destroy` consumes
/// the pool, so no lookup can outlive the storage.
///
/// `Handle` is `Copy` regardless of `T`; it is just four integers.
pub struct Handle<T> {
    pool: u32,
    arena: u32,
    slot: u32,
    generation: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    #[inline]
    pub(crate) const fn new(pool: u32, arena: u32, slot: u32, generation: u32) -> Self {
        Handle {
            pool,
            arena,
            slot,
            generation,
            _marker: PhantomData,
        }
    }

    /// Index of the arena in the pool's chain.
    #[inline]
    pub const fn arena(self) -> usize {
        self.arena as usize
    }

    /// Slot index inside the arena.
    #[inline]
    pub const fn slot(self) -> usize {
        self.slot as usize
    }

    #[inline]
    pub(crate) const fn pool(self) -> u32 {
        self.pool
    }

    #[inline]
    pub(crate) const fn generation(self) -> u32 {
        self.generation
    }
}

impl<T> Clone for Handle<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.pool == other.pool
            && self.arena == other.arena
            && self.slot == other.slot
            && self.generation == other.generation
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pool.hash(state);
        self.arena.hash(state);
        self.slot.hash(state);
        self.generation.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({}:{}#{})", self.arena, self.slot, self.generation)
    }
}
