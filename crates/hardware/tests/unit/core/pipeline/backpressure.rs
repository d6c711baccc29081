//! # Backpressure
//!
//! Small ROB and IQ capacities stall rename and dispatch; the stall
//! propagates upstream through the busy signals and every instruction still
//! retires in order.

use crate::common::{TestContext, chain, independent};
use o3sim_core::core::pipeline::Stage;
use o3sim_core::{OpClass, TraceRecord};

fn long_independent(n: usize) -> Vec<TraceRecord> {
    (0..n)
        .map(|i| TraceRecord::new(i as u64 * 4, OpClass::Long).with_dst(i + 1))
        .collect()
}

#[test]
fn test_full_rob_stalls_rename() {
    let ctx = TestContext::new(2, 2, 1);
    let run = ctx.run(long_independent(6));

    assert_eq!(run.records.len(), 6);
    assert!(run.stats.rob_stall_cycles > 0);
    assert!(run.stats.peak_rob_occupancy <= 2);

    // I0 retires in cycle 12; I2 holds in Rename from cycle 4 until then.
    assert_eq!(run.start(0, Stage::Retire), 12);
    assert_eq!(run.start(2, Stage::Rename), 4);
    assert_eq!(run.start(2, Stage::RegisterRead), 13);
}

#[test]
fn test_rename_stall_backs_up_fetch() {
    let ctx = TestContext::new(2, 2, 1);
    let run = ctx.run(long_independent(6));

    assert!(run.stats.fetch_stall_cycles > 0);
    // I3 is held in Decode while I2 waits in Rename.
    assert!(run.duration(3, Stage::Decode) > 1);
    assert_eq!(run.duration(3, Stage::Fetch), 1);
}

#[test]
fn test_full_issue_queue_stalls_dispatch() {
    let ctx = TestContext::new(8, 1, 1);
    let run = ctx.run(chain(4, OpClass::Long));

    assert_eq!(run.records.len(), 4);
    assert!(run.stats.iq_stall_cycles > 0);
    assert_eq!(run.stats.peak_iq_occupancy, 1);
    assert!(run.duration(2, Stage::Dispatch) > 1);
}

#[test]
fn test_group_admission_is_all_or_nothing() {
    // Width 2 over a 3-entry ROB: the second group needs a free run of two.
    let ctx = TestContext::new(3, 4, 2).with_issue_width(2);
    let run = ctx.run(long_independent(4));

    assert_eq!(run.records.len(), 4);
    assert!(run.stats.rob_stall_cycles > 0);
    // Both members of the second group enter RegisterRead together.
    assert_eq!(
        run.start(2, Stage::RegisterRead),
        run.start(3, Stage::RegisterRead)
    );
}

#[test]
fn test_retire_order_under_pressure() {
    let ctx = TestContext::new(2, 2, 2).with_issue_width(2);
    let mut trace = long_independent(3);
    trace.extend(independent(5));
    let run = ctx.run(trace);

    let seqs: Vec<u64> = run.records.iter().map(|r| r.seq).collect();
    assert_eq!(seqs, (0..8).collect::<Vec<u64>>());
}
