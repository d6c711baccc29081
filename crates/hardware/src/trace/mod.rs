//! Instruction trace input.
//!
//! The simulator consumes a pre-decoded, committed-path instruction trace.
//! This module provides:
//! 1. **Records:** The parsed five-field trace record and opcode classes.
//! 2. **Sources:** The pull-based `TraceSource` interface the fetch stage
//!    consumes, and a line-oriented reader for trace files.

/// Trace record and opcode class definitions.
pub mod record;

/// Pull-based trace sources and the text trace reader.
pub mod reader;

pub use reader::{TraceReader, TraceSource};
pub use record::{OpClass, ParseRecordError, TraceRecord};
