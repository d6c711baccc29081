//! Retire Stage: in-order retirement from the ROB head.
//!
//! Up to `width` instructions retire per cycle. An instruction retires when:
//! 1. Its slot is the ROB head.
//! 2. The slot is completed.
//! 3. The instruction itself has reached the Retire latch.
//!
//! Retiring frees the ROB slot, clears the RAT mapping of the destination if
//! it still names the retiring slot, and emits the instruction's timing
//! record.

use crate::core::pipeline::instruction::{Instruction, RetireRecord};
use crate::core::pipeline::rat::RegisterAliasTable;
use crate::core::pipeline::rob::Rob;
use crate::stats::SimStats;

/// Executes the Retire stage. Returns the number of instructions retired.
///
/// # Panics
///
/// Panics if the ROB head entry does not belong to the retiring instruction.
pub fn retire_stage<F: FnMut(&RetireRecord)>(
    input: &mut Vec<Instruction>,
    rob: &mut Rob,
    rat: &mut RegisterAliasTable,
    width: usize,
    cycle: u64,
    stats: &mut SimStats,
    on_retire: &mut F,
) -> usize {
    for inst in input.iter_mut() {
        inst.tick();
    }

    let mut retired = 0;
    while retired < width {
        let Some((head, entry)) = rob.peek_head() else {
            break;
        };
        if !entry.completed {
            break;
        }
        let Some(pos) = input.iter().position(|i| i.rob_tag == Some(head)) else {
            break;
        };

        let inst = input.remove(pos);
        let freed = rob.retire(head);
        assert_eq!(
            freed.seq, inst.seq,
            "ROB head seq {} does not match retiring instruction",
            freed.seq
        );
        if let Some(dst) = inst.dst {
            rat.retire_clear(dst, head);
        }

        let record = inst.retire_record();
        tracing::trace!(cycle, "RT  seq={} pc={:#x} rob={}", inst.seq, inst.pc, head);
        stats.record_retire(inst.op);
        on_retire(&record);
        retired += 1;
    }
    retired
}
