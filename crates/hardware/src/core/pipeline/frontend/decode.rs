//! Decode Stage: assign execution latency.
//!
//! Trace records arrive pre-decoded, so decode only derives the fixed
//! execution latency from the opcode class. The whole group moves to Rename
//! once Rename is not busy.

use crate::core::pipeline::instruction::Instruction;

/// Executes the Decode stage. Returns true if Decode still holds instructions.
pub fn decode_stage(
    input: &mut Vec<Instruction>,
    output: &mut Vec<Instruction>,
    rename_busy: bool,
    cycle: u64,
) -> bool {
    for inst in input.iter_mut() {
        inst.tick();
        inst.latency = inst.op.latency();
    }

    if input.is_empty() {
        return false;
    }
    if rename_busy {
        return true;
    }

    for mut inst in input.drain(..) {
        tracing::trace!(cycle, "DE  seq={} latency={}", inst.seq, inst.latency);
        inst.advance();
        output.push(inst);
    }
    false
}
