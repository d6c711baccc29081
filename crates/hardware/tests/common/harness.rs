use o3sim_core::core::pipeline::Stage;
use o3sim_core::{Config, OpClass, RetireRecord, SimStats, Simulator, TraceRecord};

/// Installs a test-friendly tracing subscriber once per process.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Builds a configuration and runs traces against it.
pub struct TestContext {
    pub config: Config,
}

impl TestContext {
    pub fn new(rob_size: usize, iq_size: usize, width: usize) -> Self {
        init_tracing();
        Self {
            config: Config::new(rob_size, iq_size, width),
        }
    }

    pub fn with_issue_width(mut self, issue_width: usize) -> Self {
        self.config.issue_width = issue_width;
        self
    }

    /// Builds a simulator over an in-memory trace.
    pub fn simulator(&self, trace: Vec<TraceRecord>) -> Simulator<std::vec::IntoIter<TraceRecord>> {
        Simulator::new(&self.config, trace.into_iter()).unwrap()
    }

    /// Runs `trace` to completion and collects every retire record.
    pub fn run(&self, trace: Vec<TraceRecord>) -> RunResult {
        let mut sim = self.simulator(trace);
        let mut records = Vec::new();
        let stats = sim.run(|r| records.push(r.clone())).unwrap().clone();
        assert_eq!(sim.pipeline().rat.in_flight_count(), 0);
        assert!(sim.pipeline().rob.is_empty());
        RunResult { records, stats }
    }
}

/// Output of a completed run.
pub struct RunResult {
    pub records: Vec<RetireRecord>,
    pub stats: SimStats,
}

impl RunResult {
    pub fn record(&self, seq: u64) -> &RetireRecord {
        self.records
            .iter()
            .find(|r| r.seq == seq)
            .unwrap_or_else(|| panic!("seq {seq} never retired"))
    }

    pub fn lines(&self) -> Vec<String> {
        self.records.iter().map(ToString::to_string).collect()
    }

    /// Entry cycle of `stage` for instruction `seq`.
    pub fn start(&self, seq: u64, stage: Stage) -> u64 {
        self.record(seq).stage(stage).start
    }

    /// Residency of `stage` for instruction `seq`.
    pub fn duration(&self, seq: u64, stage: Stage) -> u32 {
        self.record(seq).stage(stage).duration
    }
}

/// `n` class-0 instructions with no sources.
pub fn independent(n: usize) -> Vec<TraceRecord> {
    (0..n)
        .map(|i| TraceRecord::new(i as u64 * 4, OpClass::Short).with_dst(i % 32 + 1))
        .collect()
}

/// `n` instructions where each reads the previous one's destination.
pub fn chain(n: usize, op: OpClass) -> Vec<TraceRecord> {
    (0..n)
        .map(|i| {
            let rec = TraceRecord::new(i as u64 * 4, op).with_dst(i + 1);
            if i == 0 { rec } else { rec.with_src1(i) }
        })
        .collect()
}
