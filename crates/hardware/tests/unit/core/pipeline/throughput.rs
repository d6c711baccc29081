//! # Throughput
//!
//! Independent single-cycle instructions with ample structure capacity flow
//! through the nine stages in `ceil(N / W) + 8` cycles.

use crate::common::{TestContext, independent};
use o3sim_core::core::pipeline::Stage;
use rstest::rstest;

#[rstest]
#[case(1, 1)]
#[case(8, 1)]
#[case(8, 2)]
#[case(8, 4)]
#[case(7, 3)]
#[case(16, 4)]
fn test_independent_stream_cycles(#[case] n: usize, #[case] width: usize) {
    let ctx = TestContext::new(16, 16, width).with_issue_width(width);
    let run = ctx.run(independent(n));

    assert_eq!(run.records.len(), n);
    assert_eq!(run.stats.cycles, (n.div_ceil(width) + 8) as u64);
    assert_eq!(run.stats.rob_stall_cycles, 0);
    assert_eq!(run.stats.iq_stall_cycles, 0);
}

#[rstest]
#[case(4)]
#[case(6)]
fn test_every_stage_takes_one_cycle_without_contention(#[case] n: usize) {
    let ctx = TestContext::new(16, 16, 2).with_issue_width(2);
    let run = ctx.run(independent(n));

    for rec in &run.records {
        for stage in Stage::ALL {
            assert_eq!(rec.stage(stage).duration, 1, "seq {} {stage}", rec.seq);
        }
        assert_eq!(rec.stage(Stage::Fetch).start, rec.seq / 2);
    }
}

#[test]
fn test_single_issue_limits_wide_pipeline() {
    let narrow = TestContext::new(16, 16, 2).run(independent(4));
    let wide = TestContext::new(16, 16, 2).with_issue_width(2).run(independent(4));

    assert_eq!(wide.stats.cycles, 10);
    assert_eq!(narrow.stats.cycles, 12);

    // Issue picks strictly by age: 0 at 5, 1 at 6, 2 at 7, 3 at 8.
    for seq in 0..4 {
        assert_eq!(narrow.start(seq, Stage::Execute), 6 + seq);
    }
    assert_eq!(narrow.duration(3, Stage::IssueWait), 3);
}
