//! # Randomized Pipeline Properties
//!
//! Random traces over random legal configurations must always drain, retire
//! in program order and respect every true dependency.

use crate::common::harness::init_tracing;
use o3sim_core::common::ArchReg;
use o3sim_core::core::pipeline::Stage;
use o3sim_core::{Config, OpClass, RetireRecord, Simulator, TraceRecord};
use proptest::prelude::*;
use std::collections::HashMap;

const REGS: i64 = 8;

fn op_class() -> impl Strategy<Value = OpClass> {
    prop_oneof![Just(OpClass::Short), Just(OpClass::Medium), Just(OpClass::Long)]
}

fn reg() -> impl Strategy<Value = Option<ArchReg>> {
    (-1..REGS).prop_map(|field| ArchReg::from_trace_field(field).unwrap())
}

fn record() -> impl Strategy<Value = TraceRecord> {
    (op_class(), reg(), reg(), reg()).prop_map(|(op, dst, s1, s2)| {
        let mut rec = TraceRecord::new(0, op);
        rec.dst = dst;
        rec.src = [s1, s2];
        rec
    })
}

fn trace() -> impl Strategy<Value = Vec<TraceRecord>> {
    prop::collection::vec(record(), 0..60).prop_map(|mut recs| {
        for (i, r) in recs.iter_mut().enumerate() {
            r.pc = i as u64 * 4;
        }
        recs
    })
}

fn config() -> impl Strategy<Value = Config> {
    (1usize..=4, 0usize..12, 0usize..8, 1usize..=4).prop_map(|(width, rob_extra, iq_extra, issue)| {
        let mut c = Config::new(width + rob_extra, width + iq_extra, width);
        c.issue_width = issue;
        c
    })
}

fn simulate(config: &Config, trace: Vec<TraceRecord>) -> (Vec<RetireRecord>, u64) {
    init_tracing();
    let mut sim = Simulator::new(config, trace.into_iter()).unwrap();
    let mut records = Vec::new();
    let cycles = sim.run(|r| records.push(r.clone())).unwrap().cycles;
    (records, cycles)
}

/// Index of the latest earlier instruction writing each source register.
fn producers(trace: &[TraceRecord]) -> Vec<[Option<usize>; 2]> {
    let mut last_writer: HashMap<usize, usize> = HashMap::new();
    trace
        .iter()
        .enumerate()
        .map(|(i, rec)| {
            let deps = rec
                .src
                .map(|s| s.and_then(|r| last_writer.get(&r.index()).copied()));
            if let Some(dst) = rec.dst {
                let _ = last_writer.insert(dst.index(), i);
            }
            deps
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_retires_everything_in_order(config in config(), trace in trace()) {
        let n = trace.len();
        let (records, cycles) = simulate(&config, trace);

        prop_assert_eq!(records.len(), n);
        for (i, r) in records.iter().enumerate() {
            prop_assert_eq!(r.seq, i as u64);
        }
        match records.last() {
            Some(last) => {
                prop_assert_eq!(cycles, last.end_cycle());
            }
            None => {
                prop_assert_eq!(cycles, 1);
            }
        }
    }

    #[test]
    fn prop_stage_timing_is_consistent(config in config(), trace in trace()) {
        let (records, _) = simulate(&config, trace);

        for r in &records {
            prop_assert_eq!(r.stage(Stage::Fetch).duration, 1);
            prop_assert_eq!(r.stage(Stage::Execute).duration, r.op.latency());
            prop_assert_eq!(r.stage(Stage::Writeback).duration, 1);
            for stage in Stage::ALL {
                prop_assert!(r.stage(stage).duration >= 1);
            }
        }
        for pair in records.windows(2) {
            prop_assert!(pair[0].stage(Stage::Fetch).start <= pair[1].stage(Stage::Fetch).start);
            prop_assert!(pair[0].stage(Stage::Retire).start <= pair[1].stage(Stage::Retire).start);
        }
    }

    #[test]
    fn prop_consumers_wait_for_producers(config in config(), trace in trace()) {
        let deps = producers(&trace);
        let (records, _) = simulate(&config, trace);

        for (i, r) in records.iter().enumerate() {
            let ex = r.stage(Stage::Execute).start;
            for p in deps[i].iter().flatten() {
                let producer = &records[*p];
                let ready = producer.stage(Stage::Execute).start
                    + u64::from(producer.op.latency());
                prop_assert!(
                    ex >= ready,
                    "seq {} executes at {} before producer {} is ready at {}",
                    i, ex, p, ready
                );
            }
        }
    }

    #[test]
    fn prop_width_bounds_per_cycle_activity(config in config(), trace in trace()) {
        let (records, _) = simulate(&config, trace);

        let mut fetched: HashMap<u64, usize> = HashMap::new();
        let mut issued: HashMap<u64, usize> = HashMap::new();
        let mut retired: HashMap<u64, usize> = HashMap::new();
        for r in &records {
            *fetched.entry(r.stage(Stage::Fetch).start).or_default() += 1;
            *issued.entry(r.stage(Stage::Execute).start).or_default() += 1;
            let rt = r.stage(Stage::Retire);
            *retired.entry(rt.start + u64::from(rt.duration) - 1).or_default() += 1;
        }
        prop_assert!(fetched.values().all(|&c| c <= config.width));
        prop_assert!(issued.values().all(|&c| c <= config.issue_width));
        prop_assert!(retired.values().all(|&c| c <= config.width));
    }
}
