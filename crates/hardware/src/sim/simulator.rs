//! Simulator: owns the pipeline, the trace source and run statistics.
//!
//! Each call to [`Simulator::tick`] runs one full pipeline cycle. The run ends
//! once the trace is exhausted and no instruction remains in flight; the
//! reported cycle count is the index of the last simulated cycle plus one.
//!
//! A watchdog aborts the run with [`SimError::Deadlock`] when no instruction
//! retires for `max_idle_cycles` consecutive cycles while work is in flight.

use crate::common::error::SimError;
use crate::config::Config;
use crate::core::pipeline::engine::Pipeline;
use crate::core::pipeline::instruction::RetireRecord;
use crate::stats::SimStats;
use crate::trace::reader::TraceSource;

/// Top-level simulator: pipeline state plus the trace it consumes.
#[derive(Debug)]
pub struct Simulator<T> {
    pipeline: Pipeline,
    trace: T,
    stats: SimStats,
    cycle: u64,
    idle_cycles: u64,
    max_idle_cycles: u64,
    done: bool,
}

impl<T: TraceSource> Simulator<T> {
    /// Creates a simulator after validating `config`.
    pub fn new(config: &Config, trace: T) -> Result<Self, SimError> {
        config.validate()?;
        tracing::debug!(
            rob_size = config.rob_size,
            iq_size = config.iq_size,
            width = config.width,
            issue_width = config.issue_width,
            arch_regs = config.arch_regs,
            "simulator configured"
        );
        Ok(Self {
            pipeline: Pipeline::new(config),
            trace,
            stats: SimStats::default(),
            cycle: 0,
            idle_cycles: 0,
            max_idle_cycles: config.max_idle_cycles,
            done: false,
        })
    }

    /// Advances the simulation by one clock cycle.
    ///
    /// Does nothing once the run has finished.
    pub fn tick<F: FnMut(&RetireRecord)>(&mut self, on_retire: &mut F) -> Result<(), SimError> {
        if self.done {
            return Ok(());
        }

        let cycle = self.cycle;
        let retired = self
            .pipeline
            .tick(cycle, &mut self.trace, &mut self.stats, on_retire);
        self.cycle += 1;
        self.stats.cycles = self.cycle;

        if self.pipeline.is_drained() {
            self.done = true;
            return Ok(());
        }

        if retired > 0 {
            self.idle_cycles = 0;
        } else {
            self.idle_cycles += 1;
            if self.idle_cycles >= self.max_idle_cycles {
                self.pipeline.dump_state(cycle);
                return Err(SimError::Deadlock {
                    cycle,
                    idle: self.idle_cycles,
                    in_flight: self.pipeline.in_flight(),
                });
            }
        }
        Ok(())
    }

    /// Runs until the trace drains, calling `on_retire` for every retired
    /// instruction in program order.
    pub fn run<F: FnMut(&RetireRecord)>(&mut self, mut on_retire: F) -> Result<&SimStats, SimError> {
        while !self.done {
            self.tick(&mut on_retire)?;
        }
        tracing::info!(
            cycles = self.stats.cycles,
            retired = self.stats.instructions_retired,
            ipc = self.stats.ipc(),
            "simulation finished"
        );
        Ok(&self.stats)
    }

    /// Returns true once the trace is exhausted and the pipeline has drained.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Number of cycles simulated so far.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Statistics collected so far.
    pub fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Read access to the pipeline, for inspection between cycles.
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Consumes the simulator and returns its statistics.
    pub fn into_stats(self) -> SimStats {
        self.stats
    }
}
