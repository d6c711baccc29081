//! Pipeline engine: per-cycle stage orchestration.
//!
//! The [`Pipeline`] owns every structure shared between stages (ROB, RAT,
//! issue queue, completion broadcast and the stage latches) and advances
//! them one cycle at a time.
//!
//! Stages run in reverse pipeline order each cycle:
//! Retire, Writeback, Execute, Issue, Dispatch, RegisterRead, Rename, Decode, Fetch.
//! A resource freed downstream is therefore visible upstream in the same
//! cycle, while anything an upstream stage produces is only seen downstream
//! on the next cycle. Busy signals flow the same way: each in-order stage
//! returns whether it still holds instructions, and that value gates the
//! stage before it.

use crate::config::Config;
use crate::core::pipeline::backend::{dispatch, execute, issue, register_read, retire, writeback};
use crate::core::pipeline::broadcast::Broadcast;
use crate::core::pipeline::frontend::{FetchUnit, decode, fetch, rename};
use crate::core::pipeline::instruction::{RetireRecord, Stage};
use crate::core::pipeline::issue_queue::IssueQueue;
use crate::core::pipeline::latches::Latches;
use crate::core::pipeline::rat::RegisterAliasTable;
use crate::core::pipeline::rob::Rob;
use crate::stats::SimStats;
use crate::trace::reader::TraceSource;

/// The out-of-order pipeline state.
#[derive(Clone, Debug)]
pub struct Pipeline {
    /// Reorder buffer.
    pub rob: Rob,
    /// Register alias table.
    pub rat: RegisterAliasTable,
    /// Issue queue.
    pub iq: IssueQueue,
    /// Slots completed this cycle and not yet written back.
    pub broadcast: Broadcast,
    /// Per-stage instruction latches.
    pub latches: Latches,
    /// Fetch sequence state.
    pub fetch: FetchUnit,
    /// Superscalar width.
    pub width: usize,
    /// Maximum selections per cycle.
    pub issue_width: usize,
}

impl Pipeline {
    /// Builds an empty pipeline sized by `config`.
    ///
    /// The configuration is assumed valid; see [`Config::validate`].
    pub fn new(config: &Config) -> Self {
        Self {
            rob: Rob::new(config.rob_size),
            rat: RegisterAliasTable::new(config.arch_regs),
            iq: IssueQueue::new(config.iq_size),
            broadcast: Broadcast::with_capacity(config.width),
            latches: Latches::new(config.width),
            fetch: FetchUnit::default(),
            width: config.width,
            issue_width: config.issue_width,
        }
    }

    /// Runs one cycle of all nine stages. Returns the number of instructions
    /// retired this cycle.
    pub fn tick<T, F>(
        &mut self,
        cycle: u64,
        trace: &mut T,
        stats: &mut SimStats,
        on_retire: &mut F,
    ) -> usize
    where
        T: TraceSource + ?Sized,
        F: FnMut(&RetireRecord),
    {
        let l = &mut self.latches;

        let retired = retire::retire_stage(
            &mut l.retire,
            &mut self.rob,
            &mut self.rat,
            self.width,
            cycle,
            stats,
            on_retire,
        );

        writeback::writeback_stage(&mut l.writeback, &mut l.retire, &mut self.broadcast, cycle);

        execute::execute_stage(
            &mut l.execute,
            &mut l.writeback,
            &mut self.rob,
            &mut self.iq,
            &mut self.broadcast,
            cycle,
        );

        issue::issue_stage(
            &mut l.issue_wait,
            &mut l.execute,
            &mut self.iq,
            self.issue_width,
            cycle,
            stats,
        );

        let dispatch_busy = dispatch::dispatch_stage(
            &mut l.dispatch,
            &mut l.issue_wait,
            &mut self.iq,
            &self.rob,
            &self.broadcast,
            self.width,
            cycle,
            stats,
        );

        let rr_busy = register_read::register_read_stage(
            &mut l.register_read,
            &mut l.dispatch,
            dispatch_busy,
            &self.rob,
            &self.broadcast,
            cycle,
        );

        let rename_busy = rename::rename_stage(
            &mut l.rename,
            &mut l.register_read,
            rr_busy,
            &mut self.rob,
            &mut self.rat,
            self.width,
            cycle,
            stats,
        );

        let decode_busy = decode::decode_stage(&mut l.decode, &mut l.rename, rename_busy, cycle);

        fetch::fetch_stage(
            &mut self.fetch,
            trace,
            &mut l.decode,
            decode_busy,
            self.width,
            cycle,
            stats,
        );

        retired
    }

    /// Number of instructions between fetch and retirement.
    pub fn in_flight(&self) -> usize {
        self.latches.in_flight()
    }

    /// Returns true once the trace is exhausted and nothing is in flight.
    pub fn is_drained(&self) -> bool {
        self.fetch.exhausted && self.latches.is_empty()
    }

    /// Logs the full pipeline state at error level.
    pub fn dump_state(&self, cycle: u64) {
        tracing::error!(
            cycle,
            rob_len = self.rob.len(),
            rob_head = %self.rob.head(),
            iq_len = self.iq.len(),
            rat_in_flight = self.rat.in_flight_count(),
            broadcast = self.broadcast.len(),
            "pipeline state"
        );
        for stage in Stage::ALL {
            let Some(latch) = self.latches.get(stage) else {
                continue;
            };
            for inst in latch {
                tracing::error!(
                    "  {}  seq={} pc={:#x} rob={:?} operands={:?} cycles={:?}",
                    stage,
                    inst.seq,
                    inst.pc,
                    inst.rob_tag,
                    inst.operands,
                    inst.cycles
                );
            }
        }
    }
}
