//! Error definitions for the pipeline simulator.
//!
//! This module defines the recoverable error types surfaced to callers:
//! 1. **Configuration Errors:** Processor parameters that can never make progress.
//! 2. **Simulation Errors:** Everything a full run can report (bad config, I/O,
//!    malformed JSON configuration, and the progress watchdog).
//!
//! Internal invariant violations (retiring a non-completed head, addressing an
//! unoccupied slot) are not represented here; they are programming errors and
//! abort the run through `assert!`.

use thiserror::Error;

/// Reasons a processor configuration is rejected before simulation starts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A size parameter was zero.
    #[error("{field} must be a positive integer")]
    ZeroSize {
        /// Name of the offending configuration field.
        field: &'static str,
    },

    /// The superscalar width exceeds the reorder buffer capacity.
    ///
    /// Rename needs `width` contiguous free slots; such a run never exists.
    #[error("width {width} exceeds ROB capacity {rob_size}")]
    WidthExceedsRob {
        /// Configured superscalar width.
        width: usize,
        /// Configured ROB capacity.
        rob_size: usize,
    },

    /// The superscalar width exceeds the issue queue capacity.
    ///
    /// Dispatch needs `width` free entries; that many never exist.
    #[error("width {width} exceeds issue queue capacity {iq_size}")]
    WidthExceedsIq {
        /// Configured superscalar width.
        width: usize,
        /// Configured IQ capacity.
        iq_size: usize,
    },
}

/// Errors reported by a simulation run or its setup.
#[derive(Debug, Error)]
pub enum SimError {
    /// The processor configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Reading the trace or configuration file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON configuration document could not be parsed.
    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// No instruction retired for too long while instructions were in flight.
    #[error("no instruction retired for {idle} cycles at cycle {cycle} ({in_flight} in flight)")]
    Deadlock {
        /// Cycle at which the watchdog fired.
        cycle: u64,
        /// Consecutive cycles without a retirement.
        idle: u64,
        /// Instructions still in the pipeline.
        in_flight: usize,
    },
}
