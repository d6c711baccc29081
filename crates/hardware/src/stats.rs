//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for a pipeline run. It provides:
//! 1. **Cycle and IPC:** Total cycles, retired instructions, and derived metrics (IPC, CPI).
//! 2. **Instruction mix:** Retired counts per opcode class.
//! 3. **Stalls:** Cycles lost to fetch backpressure, ROB runs and IQ capacity.
//! 4. **Occupancy:** Peak ROB and IQ occupancy.

use crate::trace::record::OpClass;
use serde::Serialize;
use std::io::{self, Write};

/// Simulation statistics for a single run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Total simulated cycles (index of the last cycle plus one).
    pub cycles: u64,
    /// Instructions read from the trace.
    pub instructions_fetched: u64,
    /// Instructions issued to execute.
    pub instructions_issued: u64,
    /// Instructions retired.
    pub instructions_retired: u64,

    /// Retired class-0 (1-cycle) instructions.
    pub inst_short: u64,
    /// Retired class-1 (2-cycle) instructions.
    pub inst_medium: u64,
    /// Retired class-2 (5-cycle) instructions.
    pub inst_long: u64,

    /// Cycles fetch was held because Decode was busy.
    pub fetch_stall_cycles: u64,
    /// Cycles rename was held for lack of a free ROB run.
    pub rob_stall_cycles: u64,
    /// Cycles dispatch was held for lack of free IQ entries.
    pub iq_stall_cycles: u64,

    /// Highest number of occupied ROB slots seen.
    pub peak_rob_occupancy: usize,
    /// Highest number of occupied IQ entries seen.
    pub peak_iq_occupancy: usize,
}

impl SimStats {
    /// Instructions retired per cycle.
    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.instructions_retired as f64 / self.cycles as f64
        }
    }

    /// Cycles per retired instruction.
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_retired as f64
        }
    }

    /// Counts a retirement of the given opcode class.
    pub fn record_retire(&mut self, op: OpClass) {
        self.instructions_retired += 1;
        match op {
            OpClass::Short => self.inst_short += 1,
            OpClass::Medium => self.inst_medium += 1,
            OpClass::Long => self.inst_long += 1,
        }
    }

    /// Writes the full statistics block to `out`.
    pub fn print(&self, out: &mut impl Write) -> io::Result<()> {
        let total = self.instructions_retired.max(1) as f64;
        let pct = |n: u64| n as f64 / total * 100.0;
        let cyc = self.cycles.max(1) as f64;
        let stall_pct = |n: u64| n as f64 / cyc * 100.0;

        writeln!(out, "==========================================================")?;
        writeln!(out, "PIPELINE SIMULATION STATISTICS")?;
        writeln!(out, "==========================================================")?;
        writeln!(out, "sim_cycles               {}", self.cycles)?;
        writeln!(out, "sim_insts                {}", self.instructions_retired)?;
        writeln!(out, "sim_ipc                  {:.4}", self.ipc())?;
        writeln!(out, "sim_cpi                  {:.4}", self.cpi())?;
        writeln!(out, "----------------------------------------------------------")?;
        writeln!(out, "INSTRUCTION MIX")?;
        writeln!(
            out,
            "  class 0 (1 cyc)        {:<10} ({:.2}%)",
            self.inst_short,
            pct(self.inst_short)
        )?;
        writeln!(
            out,
            "  class 1 (2 cyc)        {:<10} ({:.2}%)",
            self.inst_medium,
            pct(self.inst_medium)
        )?;
        writeln!(
            out,
            "  class 2 (5 cyc)        {:<10} ({:.2}%)",
            self.inst_long,
            pct(self.inst_long)
        )?;
        writeln!(out, "----------------------------------------------------------")?;
        writeln!(out, "STALLS")?;
        writeln!(
            out,
            "  fetch                  {:<10} ({:.2}% of cycles)",
            self.fetch_stall_cycles,
            stall_pct(self.fetch_stall_cycles)
        )?;
        writeln!(
            out,
            "  rob_run                {:<10} ({:.2}% of cycles)",
            self.rob_stall_cycles,
            stall_pct(self.rob_stall_cycles)
        )?;
        writeln!(
            out,
            "  iq_full                {:<10} ({:.2}% of cycles)",
            self.iq_stall_cycles,
            stall_pct(self.iq_stall_cycles)
        )?;
        writeln!(out, "----------------------------------------------------------")?;
        writeln!(out, "OCCUPANCY")?;
        writeln!(out, "  rob_peak               {}", self.peak_rob_occupancy)?;
        writeln!(out, "  iq_peak                {}", self.peak_iq_occupancy)?;
        writeln!(out, "  issued                 {}", self.instructions_issued)?;
        writeln!(out, "==========================================================")
    }
}
