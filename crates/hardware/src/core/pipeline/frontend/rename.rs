//! Rename Stage: ROB allocation and RAT lookup/update.
//!
//! Rename admits its group only if the ROB has a free run of `width` slots
//! starting at the tail; admission is all-or-nothing. For each instruction in
//! program order it then:
//! 1. Resolves both sources through the RAT (no register or committed value
//!    becomes ready; an in-flight producer becomes a pending slot).
//! 2. Allocates the tail ROB slot.
//! 3. Records the slot as the new producer of the destination register.
//!
//! Sources are captured BEFORE the destination mapping is updated, so an
//! instruction reading its own destination (`r1 <- r1 op r2`) depends on the
//! previous producer of `r1`, not on itself.

use crate::core::pipeline::instruction::{Instruction, Operand};
use crate::core::pipeline::rat::RegisterAliasTable;
use crate::core::pipeline::rob::Rob;
use crate::stats::SimStats;

/// Executes the Rename stage. Returns true if Rename still holds instructions.
#[allow(clippy::too_many_arguments)]
pub fn rename_stage(
    input: &mut Vec<Instruction>,
    output: &mut Vec<Instruction>,
    rr_busy: bool,
    rob: &mut Rob,
    rat: &mut RegisterAliasTable,
    width: usize,
    cycle: u64,
    stats: &mut SimStats,
) -> bool {
    for inst in input.iter_mut() {
        inst.tick();
    }

    if input.is_empty() {
        return false;
    }
    if rr_busy {
        return true;
    }
    if !rob.has_free_run(width) {
        stats.rob_stall_cycles += 1;
        tracing::debug!(cycle, rob_len = rob.len(), width, "RN  stall: no free ROB run");
        return true;
    }

    for mut inst in input.drain(..) {
        inst.operands = inst
            .src
            .map(|reg| Operand::from_producer(reg.and_then(|r| rat.lookup(r))));

        let tag = rob.allocate(inst.pc, inst.dst, inst.seq);
        inst.rob_tag = Some(tag);

        if let Some(dst) = inst.dst {
            rat.rename(dst, tag);
        }

        tracing::trace!(
            cycle,
            "RN  seq={} pc={:#x} rob={} src={:?}",
            inst.seq,
            inst.pc,
            tag,
            inst.operands
        );

        inst.advance();
        output.push(inst);
    }

    stats.peak_rob_occupancy = stats.peak_rob_occupancy.max(rob.len());
    false
}
