//! A single fixed-capacity slab.

use crate::{PoolError, SLOTS_PER_ARENA};

/// One slot of an arena.
///
/// The generation advances every time the slot is vacated, which is what
/// makes released handles stale.
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Fixed-capacity slab of [`SLOTS_PER_ARENA`] slots.
///
/// Free slots are tracked in `free_mask`: slot `i` is free when bit
/// `63 - i` is set, so `leading_zeros` yields the lowest free slot index.
pub(crate) struct Arena<T> {
    slots: Box<[Slot<T>]>,
    free_mask: u64,
    free_count: u32,
}

const _: () = assert!(SLOTS_PER_ARENA == u64::BITS as usize);

#[inline]
const fn slot_bit(slot: usize) -> u64 {
    1u64 << (SLOTS_PER_ARENA - 1 - slot)
}

impl<T> Arena<T> {
    /// Allocate an empty arena, reporting allocation failure instead of
    /// aborting.
    pub(crate) fn try_new() -> Result<Self, PoolError> {
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(SLOTS_PER_ARENA)
            .map_err(|_| PoolError::OutOfMemory)?;
        slots.resize_with(SLOTS_PER_ARENA, || Slot {
            generation: 0,
            value: None,
        });
        Ok(Arena {
            slots: slots.into_boxed_slice(),
            free_mask: u64::MAX,
            free_count: SLOTS_PER_ARENA as u32,
        })
    }

    #[inline]
    pub(crate) fn has_room(&self) -> bool {
        self.free_mask != 0
    }

    #[inline]
    pub(crate) fn free_count(&self) -> u32 {
        self.free_count
    }

    /// Store `value` in the lowest free slot, returning `(slot, generation)`.
    ///
    /// The caller guarantees `has_room()`.
    pub(crate) fn put(&mut self, value: T) -> (usize, u32) {
        debug_assert!(self.has_room(), "put into a full arena");
        let slot = self.free_mask.leading_zeros() as usize;
        self.free_mask &= !slot_bit(slot);
        self.free_count -= 1;
        let entry = &mut self.slots[slot];
        entry.value = Some(value);
        (slot, entry.generation)
    }

    /// Vacate `slot` if it is occupied at `generation`.
    pub(crate) fn vacate(&mut self, slot: usize, generation: u32) -> Option<T> {
        let entry = self.slots.get_mut(slot)?;
        if entry.generation != generation {
            return None;
        }
        let value = entry.value.take()?;
        entry.generation = entry.generation.wrapping_add(1);
        self.free_mask |= slot_bit(slot);
        self.free_count += 1;
        Some(value)
    }

    pub(crate) fn get(&self, slot: usize, generation: u32) -> Option<&T> {
        let entry = self.slots.get(slot)?;
        if entry.generation == generation {
            entry.value.as_ref()
        } else {
            None
        }
    }

    pub(crate) fn get_mut(&mut self, slot: usize, generation: u32) -> Option<&mut T> {
        let entry = self.slots.get_mut(slot)?;
        if entry.generation == generation {
            entry.value.as_mut()
        } else {
            None
        }
    }
}
