//! Register Read Stage: resolve source readiness.
//!
//! A pending source becomes ready when its producer's ROB slot is completed
//! or is on the completion broadcast this cycle. Resolution runs every cycle
//! an instruction sits here, including cycles it is held by a busy Dispatch.

use crate::core::pipeline::broadcast::Broadcast;
use crate::core::pipeline::instruction::Instruction;
use crate::core::pipeline::rob::Rob;

/// Executes the RegisterRead stage. Returns true if the stage still holds
/// instructions.
pub fn register_read_stage(
    input: &mut Vec<Instruction>,
    output: &mut Vec<Instruction>,
    dispatch_busy: bool,
    rob: &Rob,
    broadcast: &Broadcast,
    cycle: u64,
) -> bool {
    for inst in input.iter_mut() {
        inst.tick();
        inst.resolve_operands(|slot| rob.is_completed(slot) || broadcast.contains(slot));
    }

    if input.is_empty() {
        return false;
    }
    if dispatch_busy {
        return true;
    }

    for mut inst in input.drain(..) {
        tracing::trace!(
            cycle,
            "RR  seq={} ready={}",
            inst.seq,
            inst.operands_ready()
        );
        inst.advance();
        output.push(inst);
    }
    false
}
