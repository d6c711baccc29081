//! Frontend pipeline stages.
//!
//! The frontend moves instructions in order from the trace into the ROB:
//! Fetch -> Decode -> Rename.
//!
//! Each handler ticks the instructions it holds, then advances them if its
//! downstream neighbour is not busy. Decode and Rename report their own busy
//! signal to the stage before them.

/// Decode stage: latency assignment.
pub mod decode;

/// Fetch stage: trace consumption.
pub mod fetch;

/// Rename stage: ROB allocation and register renaming.
pub mod rename;

pub use fetch::FetchUnit;
