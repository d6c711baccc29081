//! Per-instruction pipeline state.
//!
//! This module defines the record each dynamic instruction carries from fetch
//! to retire:
//! 1. **Stages:** The nine pipeline stages and their timeline mnemonics.
//! 2. **Operands:** Source provenance resolved at rename (ready, or waiting on a
//!    ROB slot) and updated as producers complete.
//! 3. **Instruction:** Identity, registers, ROB slot and per-stage residency
//!    counters.
//! 4. **Retire Records:** The immutable timing summary emitted at retirement.

use crate::common::reg::ArchReg;
use crate::core::pipeline::rob::RobTag;
use crate::trace::record::{OpClass, TraceRecord};
use serde::Serialize;
use std::fmt;

/// Pipeline stage an instruction currently occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Stage {
    /// Fetched from the trace.
    Fetch,
    /// Latency assigned from the opcode class.
    Decode,
    /// Sources mapped through the RAT, ROB slot allocated.
    Rename,
    /// Source readiness resolved.
    RegisterRead,
    /// Waiting for issue queue entries.
    Dispatch,
    /// Resident in the issue queue.
    IssueWait,
    /// Executing on a functional unit.
    Execute,
    /// Result broadcast retired from the bypass set.
    Writeback,
    /// Waiting to reach the ROB head.
    Retire,
}

impl Stage {
    /// Number of stages.
    pub const COUNT: usize = 9;

    /// All stages in pipeline order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Fetch,
        Self::Decode,
        Self::Rename,
        Self::RegisterRead,
        Self::Dispatch,
        Self::IssueWait,
        Self::Execute,
        Self::Writeback,
        Self::Retire,
    ];

    /// Position of the stage in pipeline order.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Two-letter mnemonic used in timeline output and trace logs.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Fetch => "FE",
            Self::Decode => "DE",
            Self::Rename => "RN",
            Self::RegisterRead => "RR",
            Self::Dispatch => "DI",
            Self::IssueWait => "IS",
            Self::Execute => "EX",
            Self::Writeback => "WB",
            Self::Retire => "RT",
        }
    }

    /// The following stage, or `None` after Retire.
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Fetch => Some(Self::Decode),
            Self::Decode => Some(Self::Rename),
            Self::Rename => Some(Self::RegisterRead),
            Self::RegisterRead => Some(Self::Dispatch),
            Self::Dispatch => Some(Self::IssueWait),
            Self::IssueWait => Some(Self::Execute),
            Self::Execute => Some(Self::Writeback),
            Self::Writeback => Some(Self::Retire),
            Self::Retire => None,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Provenance of a source operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    /// Value available: no source register, or the value was committed.
    Ready,
    /// Value produced by the instruction in `slot`.
    Pending {
        /// ROB slot of the producer.
        slot: RobTag,
        /// Set once the producer has completed; never cleared.
        ready: bool,
    },
}

impl Operand {
    /// Builds an operand from a RAT lookup result.
    pub const fn from_producer(producer: Option<RobTag>) -> Self {
        match producer {
            None => Self::Ready,
            Some(slot) => Self::Pending { slot, ready: false },
        }
    }

    /// Returns true once the value is available.
    #[inline]
    pub const fn is_ready(self) -> bool {
        match self {
            Self::Ready => true,
            Self::Pending { ready, .. } => ready,
        }
    }

    /// Returns the producer slot if the operand is still waiting.
    #[inline]
    pub const fn waiting_on(self) -> Option<RobTag> {
        match self {
            Self::Pending { slot, ready: false } => Some(slot),
            _ => None,
        }
    }

    /// Marks the operand ready if it waits on `slot`.
    pub fn wake(&mut self, slot: RobTag) {
        if let Self::Pending { slot: s, ready } = self
            && *s == slot
        {
            *ready = true;
        }
    }

    /// Marks the operand ready if `is_done` reports its producer finished.
    pub fn resolve(&mut self, is_done: impl Fn(RobTag) -> bool) {
        if let Some(slot) = self.waiting_on()
            && is_done(slot)
        {
            self.wake(slot);
        }
    }
}

/// One dynamic instruction in flight.
#[derive(Clone, Debug)]
pub struct Instruction {
    /// Program-order sequence number, assigned at fetch.
    pub seq: u64,
    /// Program counter.
    pub pc: u64,
    /// Opcode class.
    pub op: OpClass,
    /// Source registers as named by the trace.
    pub src: [Option<ArchReg>; 2],
    /// Destination register as named by the trace.
    pub dst: Option<ArchReg>,
    /// Source provenance, filled in at rename.
    pub operands: [Operand; 2],
    /// Allocated ROB slot, set at rename.
    pub rob_tag: Option<RobTag>,
    /// Execution latency in cycles, set at decode.
    pub latency: u32,
    /// Current stage.
    pub stage: Stage,
    /// Cycles spent in each stage, indexed by [`Stage::index`].
    pub cycles: [u32; Stage::COUNT],
    /// Superscalar lane within the fetch group.
    pub lane: usize,
    /// Cycle the instruction was fetched.
    pub fetch_cycle: u64,
}

impl Instruction {
    /// Creates a freshly fetched instruction.
    pub fn fetched(record: TraceRecord, seq: u64, lane: usize, cycle: u64) -> Self {
        let mut cycles = [0; Stage::COUNT];
        cycles[Stage::Fetch.index()] = 1;
        Self {
            seq,
            pc: record.pc,
            op: record.op,
            src: record.src,
            dst: record.dst,
            operands: [Operand::Ready; 2],
            rob_tag: None,
            latency: 0,
            stage: Stage::Fetch,
            cycles,
            lane,
            fetch_cycle: cycle,
        }
    }

    /// ROB slot allocated at rename.
    ///
    /// # Panics
    ///
    /// Panics if the instruction has not been renamed.
    pub fn rob_slot(&self) -> RobTag {
        match self.rob_tag {
            Some(tag) => tag,
            None => panic!("instruction {} has no ROB slot before rename", self.seq),
        }
    }

    /// Counts one cycle of residency in the current stage.
    #[inline]
    pub fn tick(&mut self) {
        self.cycles[self.stage.index()] += 1;
    }

    /// Cycles spent so far in the current stage.
    #[inline]
    pub fn stage_cycles(&self) -> u32 {
        self.cycles[self.stage.index()]
    }

    /// Moves the instruction to the next stage.
    ///
    /// # Panics
    ///
    /// Panics if called on a retiring instruction.
    pub fn advance(&mut self) {
        self.stage = match self.stage.next() {
            Some(next) => next,
            None => panic!("instruction {} advanced past retire", self.seq),
        };
    }

    /// Returns true once both sources are available.
    #[inline]
    pub fn operands_ready(&self) -> bool {
        self.operands.iter().all(|o| o.is_ready())
    }

    /// Resolves pending operands against a completion predicate.
    pub fn resolve_operands(&mut self, is_done: impl Fn(RobTag) -> bool) {
        for operand in &mut self.operands {
            operand.resolve(&is_done);
        }
    }

    /// Builds the timing summary emitted at retirement.
    pub fn retire_record(&self) -> RetireRecord {
        let mut start = self.fetch_cycle;
        let timing = Stage::ALL.map(|stage| {
            let duration = self.cycles[stage.index()];
            let t = StageTiming { start, duration };
            start += u64::from(duration);
            t
        });
        RetireRecord {
            seq: self.seq,
            pc: self.pc,
            op: self.op,
            src: self.src,
            dst: self.dst,
            timing,
        }
    }
}

/// Entry cycle and residency of one stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct StageTiming {
    /// Cycle the instruction entered the stage.
    pub start: u64,
    /// Cycles spent in the stage.
    pub duration: u32,
}

/// Per-stage timing summary of a retired instruction.
///
/// The `Display` form is the timeline line:
///
/// ```text
/// 0 fu{0} src{-1,-1} dst{1} FE{0,1} DE{1,1} RN{2,1} RR{3,1} DI{4,1} IS{5,1} EX{6,1} WB{7,1} RT{8,1}
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RetireRecord {
    /// Program-order sequence number.
    pub seq: u64,
    /// Program counter.
    pub pc: u64,
    /// Opcode class.
    pub op: OpClass,
    /// Source registers.
    pub src: [Option<ArchReg>; 2],
    /// Destination register.
    pub dst: Option<ArchReg>,
    /// Timing per stage, in pipeline order.
    pub timing: [StageTiming; Stage::COUNT],
}

impl RetireRecord {
    /// Timing of a single stage.
    #[inline]
    pub fn stage(&self, stage: Stage) -> StageTiming {
        self.timing[stage.index()]
    }

    /// Cycle the instruction left the pipeline (exclusive).
    pub fn end_cycle(&self) -> u64 {
        let rt = self.stage(Stage::Retire);
        rt.start + u64::from(rt.duration)
    }
}

impl fmt::Display for RetireRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} fu{{{}}} src{{{},{}}} dst{{{}}}",
            self.seq,
            self.op,
            ArchReg::display_opt(self.src[0]),
            ArchReg::display_opt(self.src[1]),
            ArchReg::display_opt(self.dst),
        )?;
        for (stage, t) in Stage::ALL.iter().zip(&self.timing) {
            write!(f, " {}{{{},{}}}", stage.mnemonic(), t.start, t.duration)?;
        }
        Ok(())
    }
}
