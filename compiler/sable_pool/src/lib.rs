//! Slab pool allocator.
//!
//! Every token and syntax node the front end produces lives in a [`Pool`].
//! A pool is a chain of fixed-capacity arenas; allocation hands out the
//! lowest free slot of the current arena and release puts the slot back
//! into its arena's free mask.
//!
//! # Allocation Path
//!
//! - Current arena has a free slot: take it (`leading_zeros` on the mask).
//! - Current arena is full and nothing was released since the last scan:
//!   append a fresh arena. Building a tree top-down only ever hits this path.
//! - Current arena is full after releases: scan the chain for the first
//!   arena with a free slot. If none has one, clear the flag and append.
//!
//! Release promotes the arena it returns to when that arena now has more
//! free slots than the current one, biasing future allocations toward the
//! emptiest arena.
//!
//! The pool never shrinks. [`Pool::destroy`] returns every arena at once.
//!
//! # Handles
//!
//! [`Handle`] is an arena id plus slot index, never an address. Handles are
//! checked against the issuing pool and the slot generation, so a released
//! or foreign handle resolves to nothing. Use after destroy cannot be
//! written at all:
//!
//! ```compile_fail
//! use sable_pool::Pool;
//!
//! let mut pool = Pool::new();
//! let handle = pool.attain(7u32).unwrap();
//! pool.destroy();
//! let _ = pool.get(handle);
//! ```

mod arena;
mod handle;

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use tracing::{debug, trace};

use arena::Arena;
pub use handle::Handle;

/// Number of slots in one arena.
pub const SLOTS_PER_ARENA: usize = 64;

/// Errors reported by the pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// A new arena could not be allocated, or the configured arena limit
    /// was reached.
    #[error("out of memory")]
    OutOfMemory,
    /// The handle was released already, or was issued by a different pool.
    #[error("stale pool handle")]
    StaleHandle,
}

static NEXT_POOL_ID: AtomicU32 = AtomicU32::new(0);

/// Slab pool of `T` values addressed by [`Handle`]s.
pub struct Pool<T> {
    id: u32,
    arenas: Vec<Arena<T>>,
    current: usize,
    released_since_scan: bool,
    arena_limit: Option<usize>,
}

impl<T> Pool<T> {
    /// Create an empty pool. No arena is allocated until the first `attain`.
    pub fn new() -> Self {
        Pool {
            id: NEXT_POOL_ID.fetch_add(1, Ordering::Relaxed),
            arenas: Vec::new(),
            current: 0,
            released_since_scan: false,
            arena_limit: None,
        }
    }

    /// Create a pool that refuses to grow beyond `limit` arenas.
    ///
    /// Hitting the limit is reported as [`PoolError::OutOfMemory`].
    pub fn with_arena_limit(limit: usize) -> Self {
        Pool {
            arena_limit: Some(limit),
            ..Self::new()
        }
    }

    /// Store `value` and return a handle to it.
    pub fn attain(&mut self, value: T) -> Result<Handle<T>, PoolError> {
        let index = self.arena_with_room()?;
        let (slot, generation) = self.arenas[index].put(value);
        Ok(Handle::new(self.id, index as u32, slot as u32, generation))
    }

    /// Release the slot behind `handle`, handing its value back.
    pub fn release(&mut self, handle: Handle<T>) -> Result<T, PoolError> {
        if handle.pool() != self.id {
            return Err(PoolError::StaleHandle);
        }
        let index = handle.arena();
        let arena = self
            .arenas
            .get_mut(index)
            .ok_or(PoolError::StaleHandle)?;
        let value = arena
            .vacate(handle.slot(), handle.generation())
            .ok_or(PoolError::StaleHandle)?;
        let free = arena.free_count();

        self.released_since_scan = true;
        let current_free = self.arenas.get(self.current).map_or(0, Arena::free_count);
        if index != self.current && free > current_free {
            trace!(arena = index, free, "promoting arena to current");
            self.current = index;
        }
        Ok(value)
    }

    /// Borrow the value behind `handle`.
    pub fn get(&self, handle: Handle<T>) -> Option<&T> {
        if handle.pool() != self.id {
            return None;
        }
        self.arenas
            .get(handle.arena())?
            .get(handle.slot(), handle.generation())
    }

    /// Mutably borrow the value behind `handle`.
    pub fn get_mut(&mut self, handle: Handle<T>) -> Option<&mut T> {
        if handle.pool() != self.id {
            return None;
        }
        self.arenas
            .get_mut(handle.arena())?
            .get_mut(handle.slot(), handle.generation())
    }

    /// Whether `handle` currently names a live value in this pool.
    pub fn contains(&self, handle: Handle<T>) -> bool {
        self.get(handle).is_some()
    }

    /// Number of arenas in the chain.
    pub fn arena_count(&self) -> usize {
        self.arenas.len()
    }

    /// Total number of slots across all arenas.
    pub fn capacity(&self) -> usize {
        self.arenas.len() * SLOTS_PER_ARENA
    }

    /// Number of free slots across all arenas.
    pub fn free_slots(&self) -> usize {
        self.arenas.iter().map(|a| a.free_count() as usize).sum()
    }

    /// Number of live values.
    pub fn live(&self) -> usize {
        self.capacity() - self.free_slots()
    }

    /// Drop every arena at once, returning how many values were still live.
    pub fn destroy(self) -> usize {
        let live = self.live();
        debug!(arenas = self.arenas.len(), live, "destroying pool");
        live
    }

    fn arena_with_room(&mut self) -> Result<usize, PoolError> {
        if self.arenas.get(self.current).is_some_and(Arena::has_room) {
            return Ok(self.current);
        }
        if self.released_since_scan {
            if let Some(index) = self.arenas.iter().position(Arena::has_room) {
                debug!(arena = index, "chain scan found a free slot");
                self.current = index;
                return Ok(index);
            }
            self.released_since_scan = false;
        }
        self.append_arena()
    }

    fn append_arena(&mut self) -> Result<usize, PoolError> {
        if self.arena_limit.is_some_and(|limit| self.arenas.len() >= limit) {
            debug!(arenas = self.arenas.len(), "arena limit reached");
            return Err(PoolError::OutOfMemory);
        }
        let arena = Arena::try_new()?;
        self.arenas
            .try_reserve(1)
            .map_err(|_| PoolError::OutOfMemory)?;
        self.arenas.push(arena);
        self.current = self.arenas.len() - 1;
        debug!(arenas = self.arenas.len(), "appended arena");
        Ok(self.current)
    }
}

impl<T> fmt::Debug for Pool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("id", &self.id)
            .field("arenas", &self.arenas.len())
            .field("live", &self.live())
            .finish()
    }
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}
