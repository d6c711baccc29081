//! Writeback Stage: drop results from the broadcast.
//!
//! One bookkeeping cycle between Execute and Retire. The ROB completion flag
//! already carries readiness, so the slot leaves the broadcast set here.

use crate::core::pipeline::broadcast::Broadcast;
use crate::core::pipeline::instruction::Instruction;

/// Executes the Writeback stage.
pub fn writeback_stage(
    input: &mut Vec<Instruction>,
    output: &mut Vec<Instruction>,
    broadcast: &mut Broadcast,
    cycle: u64,
) {
    for mut inst in input.drain(..) {
        inst.tick();
        let tag = inst.rob_slot();
        broadcast.remove(tag);
        tracing::trace!(cycle, "WB  seq={} rob={}", inst.seq, tag);
        inst.advance();
        output.push(inst);
    }
}
