//! Inter-stage pipeline latches.
//!
//! Each stage after Fetch owns a latch holding the instructions currently
//! resident in it, in program order:
//! Decode → Rename → RegisterRead → Dispatch → IssueWait → Execute → Writeback → Retire.
//!
//! A stage handler ticks every instruction in its latch once per cycle, then
//! moves the ones it can to the next latch. Fetch has no latch: fetched
//! instructions land directly in Decode.

use crate::core::pipeline::instruction::{Instruction, Stage};

/// The set of per-stage latches.
#[derive(Clone, Debug, Default)]
pub struct Latches {
    /// Instructions in Decode.
    pub decode: Vec<Instruction>,
    /// Instructions in Rename.
    pub rename: Vec<Instruction>,
    /// Instructions in RegisterRead.
    pub register_read: Vec<Instruction>,
    /// Instructions in Dispatch.
    pub dispatch: Vec<Instruction>,
    /// Instructions resident in the issue queue.
    pub issue_wait: Vec<Instruction>,
    /// Instructions executing.
    pub execute: Vec<Instruction>,
    /// Instructions in Writeback.
    pub writeback: Vec<Instruction>,
    /// Instructions waiting to retire.
    pub retire: Vec<Instruction>,
}

impl Latches {
    /// Creates empty latches sized for a pipeline `width` wide.
    pub fn new(width: usize) -> Self {
        Self {
            decode: Vec::with_capacity(width),
            rename: Vec::with_capacity(width),
            register_read: Vec::with_capacity(width),
            dispatch: Vec::with_capacity(width),
            issue_wait: Vec::new(),
            execute: Vec::new(),
            writeback: Vec::with_capacity(width),
            retire: Vec::new(),
        }
    }

    /// Returns the latch for `stage`, or `None` for Fetch.
    pub fn get(&self, stage: Stage) -> Option<&[Instruction]> {
        let latch: &[Instruction] = match stage {
            Stage::Fetch => return None,
            Stage::Decode => &self.decode,
            Stage::Rename => &self.rename,
            Stage::RegisterRead => &self.register_read,
            Stage::Dispatch => &self.dispatch,
            Stage::IssueWait => &self.issue_wait,
            Stage::Execute => &self.execute,
            Stage::Writeback => &self.writeback,
            Stage::Retire => &self.retire,
        };
        Some(latch)
    }

    /// Iterates over every in-flight instruction, youngest stage first.
    pub fn iter(&self) -> impl Iterator<Item = &Instruction> {
        self.decode
            .iter()
            .chain(&self.rename)
            .chain(&self.register_read)
            .chain(&self.dispatch)
            .chain(&self.issue_wait)
            .chain(&self.execute)
            .chain(&self.writeback)
            .chain(&self.retire)
    }

    /// Number of instructions in flight.
    pub fn in_flight(&self) -> usize {
        [
            &self.decode,
            &self.rename,
            &self.register_read,
            &self.dispatch,
            &self.issue_wait,
            &self.execute,
            &self.writeback,
            &self.retire,
        ]
        .iter()
        .map(|l| l.len())
        .sum()
    }

    /// Returns true if no instruction is in flight.
    pub fn is_empty(&self) -> bool {
        self.in_flight() == 0
    }
}
