//! Register Alias Table (RAT).
//!
//! Maps each architectural register to the ROB slot of its latest in-flight
//! producer, or `None` if the value is already committed. Rename consults it
//! to turn register sources into slot dependencies; retire clears an entry
//! only when it still names the retiring slot.

use crate::common::reg::ArchReg;
use crate::core::pipeline::rob::RobTag;

/// Register alias table: one `Option<RobTag>` per architectural register.
#[derive(Clone, Debug)]
pub struct RegisterAliasTable {
    entries: Vec<Option<RobTag>>,
}

impl RegisterAliasTable {
    /// Creates a table for `regs` architectural registers, all committed.
    pub fn new(regs: usize) -> Self {
        Self {
            entries: vec![None; regs],
        }
    }

    /// Number of architectural registers tracked.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table tracks no registers.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the slot of the latest in-flight producer of `reg`, or `None`
    /// if the register value is committed.
    ///
    /// # Panics
    ///
    /// Panics if `reg` is outside the register file.
    #[inline]
    pub fn lookup(&self, reg: ArchReg) -> Option<RobTag> {
        self.entries[reg.index()]
    }

    /// Records `slot` as the latest producer of `reg`.
    pub fn rename(&mut self, reg: ArchReg, slot: RobTag) {
        self.entries[reg.index()] = Some(slot);
    }

    /// Clears `reg`'s producer, but only if it still names `slot`.
    ///
    /// A younger rename of the same register must survive the retirement of
    /// an older producer (WAW).
    pub fn retire_clear(&mut self, reg: ArchReg, slot: RobTag) {
        let entry = &mut self.entries[reg.index()];
        if *entry == Some(slot) {
            *entry = None;
        }
    }

    /// Number of registers with an in-flight producer.
    pub fn in_flight_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }
}
