//! Completion broadcast set.
//!
//! Holds the ROB slots of instructions that finished Execute but have not yet
//! left Writeback. Register read and dispatch consult it alongside the ROB
//! completion flags when resolving pending operands.

use crate::core::pipeline::rob::RobTag;

/// Slots whose results are currently on the bypass network.
#[derive(Clone, Debug, Default)]
pub struct Broadcast {
    slots: Vec<RobTag>,
}

impl Broadcast {
    /// Creates an empty set sized for `width` completions per cycle.
    pub fn with_capacity(width: usize) -> Self {
        Self {
            slots: Vec::with_capacity(width),
        }
    }

    /// Adds a completing slot.
    pub fn insert(&mut self, slot: RobTag) {
        if !self.contains(slot) {
            self.slots.push(slot);
        }
    }

    /// Removes a slot once its instruction leaves Writeback.
    pub fn remove(&mut self, slot: RobTag) {
        self.slots.retain(|s| *s != slot);
    }

    /// Returns true if `slot` is being broadcast.
    #[inline]
    pub fn contains(&self, slot: RobTag) -> bool {
        self.slots.contains(&slot)
    }

    /// Number of slots being broadcast.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if nothing is being broadcast.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
