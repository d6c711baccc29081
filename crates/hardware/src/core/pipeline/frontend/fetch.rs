//! Fetch Stage: pull records from the trace.
//!
//! When Decode can accept a new group, fetch reads up to `width` records and
//! turns each into an [`Instruction`] with the next sequence number, its lane
//! and fetch cycle. Every fetched instruction spends exactly one cycle in
//! Fetch and lands in the Decode latch. End of trace stops fetching for good.

use crate::core::pipeline::instruction::Instruction;
use crate::stats::SimStats;
use crate::trace::reader::TraceSource;

/// Fetch-side state carried between cycles.
#[derive(Clone, Debug, Default)]
pub struct FetchUnit {
    /// Sequence number for the next fetched instruction.
    pub next_seq: u64,
    /// Set once the trace reported end-of-stream.
    pub exhausted: bool,
}

/// Executes the Fetch stage.
pub fn fetch_stage<T: TraceSource + ?Sized>(
    unit: &mut FetchUnit,
    trace: &mut T,
    output: &mut Vec<Instruction>,
    decode_busy: bool,
    width: usize,
    cycle: u64,
    stats: &mut SimStats,
) {
    if unit.exhausted {
        return;
    }
    if decode_busy {
        stats.fetch_stall_cycles += 1;
        return;
    }

    for lane in 0..width {
        let Some(record) = trace.next_record() else {
            unit.exhausted = true;
            tracing::debug!(cycle, fetched = unit.next_seq, "FE  trace exhausted");
            break;
        };

        let mut inst = Instruction::fetched(record, unit.next_seq, lane, cycle);
        unit.next_seq += 1;
        stats.instructions_fetched += 1;
        tracing::trace!(
            cycle,
            "FE  seq={} pc={:#x} op={} lane={}",
            inst.seq,
            inst.pc,
            inst.op,
            lane
        );

        inst.advance();
        output.push(inst);
    }
}
