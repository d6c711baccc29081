//! Common types used throughout the pipeline simulator.
//!
//! This module provides the small building blocks shared by every component:
//! 1. **Register Identifiers:** A strong type for architectural register ids.
//! 2. **Error Handling:** Configuration and run-time error enums.

/// Error types for configuration, I/O and run-time faults.
pub mod error;

/// Architectural register identifiers.
pub mod reg;

pub use error::{ConfigError, SimError};
pub use reg::ArchReg;
