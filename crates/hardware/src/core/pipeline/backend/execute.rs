//! Execute Stage: fixed-latency functional units.
//!
//! An instruction stays here for exactly its latency. On its final cycle it:
//! 1. Marks its ROB slot completed.
//! 2. Adds the slot to the completion broadcast.
//! 3. Wakes dependents in the issue queue, so a consumer can issue in the
//!    same cycle its producer finishes.

use crate::core::pipeline::broadcast::Broadcast;
use crate::core::pipeline::instruction::Instruction;
use crate::core::pipeline::issue_queue::IssueQueue;
use crate::core::pipeline::rob::Rob;

/// Executes the Execute stage.
pub fn execute_stage(
    input: &mut Vec<Instruction>,
    output: &mut Vec<Instruction>,
    rob: &mut Rob,
    iq: &mut IssueQueue,
    broadcast: &mut Broadcast,
    cycle: u64,
) {
    let entries = std::mem::take(input);

    for mut inst in entries {
        inst.tick();
        if inst.stage_cycles() < inst.latency {
            input.push(inst);
            continue;
        }

        let tag = inst.rob_slot();
        rob.mark_completed(tag);
        broadcast.insert(tag);
        iq.wakeup(tag);
        tracing::trace!(cycle, "EX  seq={} rob={} done", inst.seq, tag);

        inst.advance();
        output.push(inst);
    }
}
