//! Issue Stage: oldest-ready selection.
//!
//! Every instruction resident in the issue queue counts a waiting cycle. Then
//! up to `issue_width` times the oldest entry with both operands ready is
//! selected, its entry is freed, and the instruction moves to Execute.
//! Selection is by sequence number, so ties always resolve in program order.

use crate::core::pipeline::instruction::Instruction;
use crate::core::pipeline::issue_queue::IssueQueue;
use crate::stats::SimStats;

/// Executes the Issue stage.
pub fn issue_stage(
    waiting: &mut Vec<Instruction>,
    output: &mut Vec<Instruction>,
    iq: &mut IssueQueue,
    issue_width: usize,
    cycle: u64,
    stats: &mut SimStats,
) {
    for inst in waiting.iter_mut() {
        inst.tick();
    }
    iq.tick_waiting();

    for _ in 0..issue_width {
        let Some(idx) = iq.select_oldest_ready() else {
            break;
        };
        let entry = iq.free(idx);

        let Some(pos) = waiting.iter().position(|i| i.seq == entry.seq) else {
            panic!("issue queue entry for seq {} has no waiting instruction", entry.seq);
        };
        let mut inst = waiting.remove(pos);
        inst.operands = entry.src;
        stats.instructions_issued += 1;

        tracing::trace!(
            cycle,
            "IS  seq={} rob={} waited={}",
            inst.seq,
            entry.dst,
            entry.waited
        );

        inst.advance();
        output.push(inst);
    }
}
