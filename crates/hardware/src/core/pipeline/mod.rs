//! Out-of-order instruction pipeline.
//!
//! This module contains the nine-stage pipeline model and the structures its
//! stages share:
//! 1. **Instruction:** Per-instruction state, stage residency and retire records.
//! 2. **RAT:** Architectural register to in-flight producer mapping.
//! 3. **ROB:** Circular buffer enforcing in-order retirement.
//! 4. **Issue Queue:** Wakeup and oldest-ready selection.
//! 5. **Latches:** Per-stage instruction buffers.
//! 6. **Stages:** Frontend (Fetch, Decode, Rename) and backend (RegisterRead
//!    through Retire) handlers.
//! 7. **Engine:** The per-cycle orchestration of all stages.

/// Backend stages (RegisterRead, Dispatch, Issue, Execute, Writeback, Retire).
pub mod backend;

/// Completion broadcast set.
pub mod broadcast;

/// Pipeline state and per-cycle stage orchestration.
pub mod engine;

/// Frontend stages (Fetch, Decode, Rename).
pub mod frontend;

/// Per-instruction record, stages and retire records.
pub mod instruction;

/// Issue queue with wakeup and oldest-ready select.
pub mod issue_queue;

/// Inter-stage instruction latches.
pub mod latches;

/// Register alias table.
pub mod rat;

/// Reorder buffer.
pub mod rob;

pub use engine::Pipeline;
pub use instruction::{Instruction, Operand, RetireRecord, Stage, StageTiming};
pub use issue_queue::{IqEntry, IqIndex, IssueQueue};
pub use rat::RegisterAliasTable;
pub use rob::{Rob, RobEntry, RobTag};
