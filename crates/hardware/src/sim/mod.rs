//! Simulation driver.
//!
//! Owns a pipeline and its trace source, runs the cycle loop, decides
//! termination and guards forward progress.

/// Cycle-loop driver around the pipeline.
pub mod simulator;

pub use simulator::Simulator;
