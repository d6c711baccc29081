//! Trace-driven out-of-order superscalar pipeline simulator.
//!
//! This crate models a nine-stage out-of-order pipeline cycle by cycle:
//! 1. **Trace:** Pre-decoded instruction records pulled lazily from a source.
//! 2. **Core:** Fetch, Decode, Rename, RegisterRead, Dispatch, Issue, Execute,
//!    Writeback and Retire over a shared ROB, RAT and issue queue.
//! 3. **Simulation:** The cycle loop, termination and a progress watchdog.
//! 4. **Reporting:** Per-instruction stage timing and run statistics.

/// Common types (register ids, errors).
pub mod common;
/// Simulator configuration (defaults, validation, JSON loading).
pub mod config;
/// Pipeline model (ROB, RAT, issue queue, stages, engine).
pub mod core;
/// Cycle-loop driver.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;
/// Trace records and trace sources.
pub mod trace;

/// Processor configuration; use `Config::new` or deserialize from JSON.
pub use crate::config::Config;
/// Error types surfaced by setup and runs.
pub use crate::common::error::{ConfigError, SimError};
/// Timing summary emitted for each retired instruction.
pub use crate::core::pipeline::RetireRecord;
/// Top-level driver; construct with `Simulator::new`.
pub use crate::sim::Simulator;
/// Run statistics.
pub use crate::stats::SimStats;
/// Trace inputs.
pub use crate::trace::{OpClass, TraceReader, TraceRecord, TraceSource};
