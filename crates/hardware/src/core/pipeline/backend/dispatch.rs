//! Dispatch Stage: admit a group into the issue queue.
//!
//! The group enters only if the IQ has `width` free entries. Operands keep
//! resolving while the group waits, so a producer that completes during the
//! stall is not missed.

use crate::core::pipeline::broadcast::Broadcast;
use crate::core::pipeline::instruction::Instruction;
use crate::core::pipeline::issue_queue::IssueQueue;
use crate::core::pipeline::rob::Rob;
use crate::stats::SimStats;

/// Executes the Dispatch stage. Returns true if Dispatch still holds
/// instructions.
#[allow(clippy::too_many_arguments)]
pub fn dispatch_stage(
    input: &mut Vec<Instruction>,
    output: &mut Vec<Instruction>,
    iq: &mut IssueQueue,
    rob: &Rob,
    broadcast: &Broadcast,
    width: usize,
    cycle: u64,
    stats: &mut SimStats,
) -> bool {
    for inst in input.iter_mut() {
        inst.tick();
        inst.resolve_operands(|slot| rob.is_completed(slot) || broadcast.contains(slot));
    }

    if input.is_empty() {
        return false;
    }
    if !iq.has_free(width) {
        stats.iq_stall_cycles += 1;
        tracing::debug!(cycle, iq_len = iq.len(), width, "DI  stall: issue queue full");
        return true;
    }

    for mut inst in input.drain(..) {
        let idx = iq.insert(inst.rob_slot(), inst.operands, inst.seq);
        tracing::trace!(cycle, "DI  seq={} iq={}", inst.seq, idx.0);
        inst.advance();
        output.push(inst);
    }

    stats.peak_iq_occupancy = stats.peak_iq_occupancy.max(iq.len());
    false
}
