//! Configuration system for the pipeline simulator.
//!
//! This module defines the processor parameters that shape a run. It provides:
//! 1. **Defaults:** Baseline structure sizes used when a field is omitted.
//! 2. **Structure:** A flat, serde-deserializable `Config`.
//! 3. **Validation:** Rejection of configurations that can never make progress.
//!
//! Configuration is supplied on the command line, as a JSON document, or via
//! `Config::default()` with field overrides.

use crate::common::error::{ConfigError, SimError};
use serde::{Deserialize, Serialize};

/// Default configuration constants for the simulator.
mod defaults {
    /// Default reorder buffer capacity (64 entries).
    pub const ROB_SIZE: usize = 64;

    /// Default issue queue capacity (16 entries).
    pub const IQ_SIZE: usize = 16;

    /// Default superscalar width (1 instruction per cycle).
    pub const WIDTH: usize = 1;

    /// Default issue width (1 selection per cycle).
    ///
    /// Issue historically selects a single oldest-ready instruction per
    /// cycle regardless of the fetch/retire width.
    pub const ISSUE_WIDTH: usize = 1;

    /// Default architectural register file size (67 registers).
    pub const ARCH_REGS: usize = 67;

    /// Default retirement watchdog threshold (10k cycles).
    ///
    /// The longest opcode latency is 5 cycles, so a healthy pipeline never
    /// goes anywhere near this long without retiring.
    pub const MAX_IDLE_CYCLES: u64 = 10_000;
}

/// Processor configuration for a single simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Reorder buffer capacity.
    #[serde(default = "Config::default_rob_size")]
    pub rob_size: usize,

    /// Issue queue capacity.
    #[serde(default = "Config::default_iq_size")]
    pub iq_size: usize,

    /// Superscalar width: instructions fetched, admitted and retired per cycle.
    #[serde(default = "Config::default_width")]
    pub width: usize,

    /// Maximum instructions selected for execution per cycle.
    #[serde(default = "Config::default_issue_width")]
    pub issue_width: usize,

    /// Number of architectural registers (size of the register alias table).
    #[serde(default = "Config::default_arch_regs")]
    pub arch_regs: usize,

    /// Consecutive cycles without a retirement before the run is aborted.
    #[serde(default = "Config::default_max_idle_cycles")]
    pub max_idle_cycles: u64,
}

impl Config {
    /// Returns the default reorder buffer capacity.
    fn default_rob_size() -> usize {
        defaults::ROB_SIZE
    }

    /// Returns the default issue queue capacity.
    fn default_iq_size() -> usize {
        defaults::IQ_SIZE
    }

    /// Returns the default superscalar width.
    fn default_width() -> usize {
        defaults::WIDTH
    }

    /// Returns the default issue width.
    fn default_issue_width() -> usize {
        defaults::ISSUE_WIDTH
    }

    /// Returns the default architectural register count.
    fn default_arch_regs() -> usize {
        defaults::ARCH_REGS
    }

    /// Returns the default watchdog threshold.
    fn default_max_idle_cycles() -> u64 {
        defaults::MAX_IDLE_CYCLES
    }

    /// Creates a configuration with the three primary structure sizes set
    /// and every other field at its default.
    pub fn new(rob_size: usize, iq_size: usize, width: usize) -> Self {
        Self {
            rob_size,
            iq_size,
            width,
            ..Self::default()
        }
    }

    /// Parses a JSON configuration document. Missing fields take defaults.
    ///
    /// The result is not validated; call [`Config::validate`] before use.
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Checks that the configuration can make forward progress.
    ///
    /// Every size must be positive, and `width` must not exceed the ROB or
    /// IQ capacity: rename and dispatch admit whole width-sized groups, so a
    /// group larger than the structure would stall forever.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sizes = [
            ("rob_size", self.rob_size),
            ("iq_size", self.iq_size),
            ("width", self.width),
            ("issue_width", self.issue_width),
            ("arch_regs", self.arch_regs),
        ];
        if let Some(&(field, _)) = sizes.iter().find(|(_, v)| *v == 0) {
            return Err(ConfigError::ZeroSize { field });
        }
        if self.max_idle_cycles == 0 {
            return Err(ConfigError::ZeroSize {
                field: "max_idle_cycles",
            });
        }
        if self.width > self.rob_size {
            return Err(ConfigError::WidthExceedsRob {
                width: self.width,
                rob_size: self.rob_size,
            });
        }
        if self.width > self.iq_size {
            return Err(ConfigError::WidthExceedsIq {
                width: self.width,
                iq_size: self.iq_size,
            });
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rob_size: defaults::ROB_SIZE,
            iq_size: defaults::IQ_SIZE,
            width: defaults::WIDTH,
            issue_width: defaults::ISSUE_WIDTH,
            arch_regs: defaults::ARCH_REGS,
            max_idle_cycles: defaults::MAX_IDLE_CYCLES,
        }
    }
}
