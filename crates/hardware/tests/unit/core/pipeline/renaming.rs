//! # Register Renaming
//!
//! RAT behaviour observed through the running pipeline: WAW renaming,
//! instructions without a destination, and clearing on retirement.

use crate::common::TestContext;
use o3sim_core::core::pipeline::{Operand, RobTag, Stage};
use o3sim_core::{OpClass, TraceRecord};
use std::cell::Cell;

#[test]
fn test_waw_consumer_reads_latest_producer() {
    // A: r1 <- (long); B: r1 <- (short); C: reads r1.
    let trace = vec![
        TraceRecord::new(0x0, OpClass::Long).with_dst(1),
        TraceRecord::new(0x4, OpClass::Short).with_dst(1),
        TraceRecord::new(0x8, OpClass::Short).with_dst(2).with_src1(1),
    ];
    let ctx = TestContext::new(8, 8, 1);
    let mut sim = ctx.simulator(trace.clone());

    // C renames in cycle 4 and sits in RegisterRead afterwards.
    let mut sink = |_: &o3sim_core::RetireRecord| {};
    for _ in 0..5 {
        sim.tick(&mut sink).unwrap();
    }
    let rr = &sim.pipeline().latches.register_read;
    assert_eq!(rr.len(), 1);
    assert_eq!(rr[0].seq, 2);
    assert_eq!(
        rr[0].operands,
        [
            Operand::Pending {
                slot: RobTag(1),
                ready: false
            },
            Operand::Ready
        ]
    );
    assert_eq!(sim.pipeline().rat.lookup(o3sim_core::common::ArchReg(1)), Some(RobTag(1)));

    // C executes right after B (cycle 7 completion), long before A finishes.
    let run = ctx.run(trace);
    assert_eq!(run.start(2, Stage::Execute), 8);
    assert!(run.start(2, Stage::Execute) < run.start(0, Stage::Writeback));
}

#[test]
fn test_no_destination_never_touches_rat() {
    let trace: Vec<TraceRecord> = (0..6)
        .map(|i| {
            TraceRecord::new(i * 4, OpClass::Medium)
                .with_src1(3)
                .with_src2(4)
        })
        .collect();
    let ctx = TestContext::new(4, 4, 2);
    let mut sim = ctx.simulator(trace);

    let mut retired = 0;
    let mut count = |_: &o3sim_core::RetireRecord| retired += 1;
    while !sim.is_done() {
        sim.tick(&mut count).unwrap();
        assert_eq!(sim.pipeline().rat.in_flight_count(), 0);
    }
    assert_eq!(retired, 6);
}

#[test]
fn test_retire_clears_only_matching_mapping() {
    // Two writers of r5; after the first retires the mapping still names the second.
    let trace = vec![
        TraceRecord::new(0x0, OpClass::Short).with_dst(5),
        TraceRecord::new(0x4, OpClass::Long).with_dst(5),
    ];
    let ctx = TestContext::new(8, 8, 1);
    let mut sim = ctx.simulator(trace);
    let r5 = o3sim_core::common::ArchReg(5);

    let first_retired = Cell::new(false);
    let mut sink = |r: &o3sim_core::RetireRecord| {
        if r.seq == 0 {
            first_retired.set(true);
        }
    };
    while !first_retired.get() {
        sim.tick(&mut sink).unwrap();
    }
    assert_eq!(sim.pipeline().rat.lookup(r5), Some(RobTag(1)));

    while !sim.is_done() {
        sim.tick(&mut |_: &o3sim_core::RetireRecord| {}).unwrap();
    }
    assert_eq!(sim.pipeline().rat.lookup(r5), None);
}

#[test]
fn test_committed_source_is_ready_at_rename() {
    // The producer retires long before the consumer is fetched.
    let mut trace = vec![TraceRecord::new(0, OpClass::Short).with_dst(7)];
    trace.extend((1..12).map(|i| TraceRecord::new(i * 4, OpClass::Short)));
    trace.push(TraceRecord::new(0x100, OpClass::Short).with_src1(7));

    let ctx = TestContext::new(16, 16, 1);
    let run = ctx.run(trace);
    assert_eq!(run.duration(12, Stage::IssueWait), 1);
}
