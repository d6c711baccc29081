//! Reorder Buffer (ROB) for in-order retirement.
//!
//! The ROB is a circular buffer that tracks in-flight instructions from rename
//! through retire. It provides:
//! 1. **Allocation:** Hands out slots at the tail, a whole rename group at a time.
//! 2. **Completion:** Records that a slot's result is available.
//! 3. **In-order Retire:** Frees slots strictly from the head in program order.
//!
//! Slots are freed lazily: retiring clears the occupied flag but keeps the
//! completed flag, so a consumer that still names a retired producer's slot
//! observes it as complete until the slot is handed out again.

use crate::common::reg::ArchReg;
use serde::Serialize;
use std::fmt;

/// Identifies an in-flight instruction by its ROB slot index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RobTag(pub usize);

impl RobTag {
    /// Returns the slot index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RobTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single slot in the Reorder Buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RobEntry {
    /// Whether the slot holds an unretired instruction.
    pub occupied: bool,
    /// Whether the instruction's result is available.
    pub completed: bool,
    /// Architectural destination register, if any.
    pub dst: Option<ArchReg>,
    /// Program-order sequence number.
    pub seq: u64,
    /// Program counter of the instruction.
    pub pc: u64,
}

/// Reorder Buffer: circular buffer enforcing in-order retirement.
#[derive(Clone, Debug)]
pub struct Rob {
    /// Fixed-size slot array.
    entries: Vec<RobEntry>,
    /// Index of the oldest occupied slot (retire point).
    head: usize,
    /// Index where the next slot will be allocated.
    tail: usize,
    /// Number of occupied slots.
    count: usize,
}

impl Rob {
    /// Creates a new ROB with the given capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ROB capacity must be positive");
        Self {
            entries: vec![RobEntry::default(); capacity],
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    /// Returns the ROB capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Returns the number of occupied slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true if no slot is occupied.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the slot at the head (the next to retire).
    #[inline]
    pub fn head(&self) -> RobTag {
        RobTag(self.head)
    }

    /// Returns the head entry, if the ROB is non-empty.
    pub fn peek_head(&self) -> Option<(RobTag, &RobEntry)> {
        if self.count == 0 {
            None
        } else {
            Some((RobTag(self.head), &self.entries[self.head]))
        }
    }

    /// Returns the entry stored in `slot`.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is out of range.
    #[inline]
    pub fn entry(&self, slot: RobTag) -> &RobEntry {
        &self.entries[slot.0]
    }

    #[inline]
    fn wrap(&self, idx: usize) -> usize {
        (idx + 1) % self.entries.len()
    }

    /// Returns true iff `n` consecutive slots starting at the tail (wrapping)
    /// are unoccupied.
    pub fn has_free_run(&self, n: usize) -> bool {
        if n > self.entries.len() {
            return false;
        }
        let mut idx = self.tail;
        for _ in 0..n {
            if self.entries[idx].occupied {
                return false;
            }
            idx = self.wrap(idx);
        }
        true
    }

    /// Allocates the tail slot and advances the tail.
    ///
    /// Callers must have checked [`Rob::has_free_run`] for their whole group.
    ///
    /// # Panics
    ///
    /// Panics if the tail slot is occupied.
    pub fn allocate(&mut self, pc: u64, dst: Option<ArchReg>, seq: u64) -> RobTag {
        let slot = self.tail;
        assert!(
            !self.entries[slot].occupied,
            "ROB allocate into occupied slot {slot}"
        );
        self.entries[slot] = RobEntry {
            occupied: true,
            completed: false,
            dst,
            seq,
            pc,
        };
        self.tail = self.wrap(slot);
        self.count += 1;
        RobTag(slot)
    }

    /// Marks a slot's result as available. Idempotent.
    ///
    /// # Panics
    ///
    /// Panics if the slot is not occupied.
    pub fn mark_completed(&mut self, slot: RobTag) {
        let entry = &mut self.entries[slot.0];
        assert!(entry.occupied, "completing unoccupied ROB slot {slot}");
        entry.completed = true;
    }

    /// Reports the completion flag of a slot.
    ///
    /// A retired slot keeps its flag until the slot is reallocated.
    #[inline]
    pub fn is_completed(&self, slot: RobTag) -> bool {
        self.entries[slot.0].completed
    }

    /// Retires the head slot and advances the head by one.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is not the head, or the head is not occupied and
    /// completed.
    pub fn retire(&mut self, slot: RobTag) -> RobEntry {
        assert_eq!(slot.0, self.head, "retiring non-head ROB slot {slot}");
        let entry = &mut self.entries[slot.0];
        assert!(
            entry.occupied && entry.completed,
            "retiring ROB slot {slot} before completion"
        );
        entry.occupied = false;
        let retired = *entry;
        self.head = self.wrap(self.head);
        self.count -= 1;
        retired
    }
}
