//! Core processor model.
//!
//! This module contains the out-of-order pipeline: its shared structures
//! (ROB, RAT, issue queue) and the stage handlers that move instructions
//! through them.

/// Instruction pipeline implementation (stages, latches, ROB, RAT, issue queue).
pub mod pipeline;

pub use self::pipeline::Pipeline;
