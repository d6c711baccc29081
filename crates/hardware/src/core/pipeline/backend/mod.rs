//! Backend pipeline stages.
//!
//! The backend covers: RegisterRead -> Dispatch -> Issue -> Execute ->
//! Writeback -> Retire. Every stage is a free function over the latches and
//! the shared ROB, RAT, issue queue and completion broadcast.

/// Dispatch stage: issue queue admission.
pub mod dispatch;

/// Execute stage: fixed-latency execution and wakeup.
pub mod execute;

/// Issue stage: oldest-ready selection.
pub mod issue;

/// Register read stage: operand readiness.
pub mod register_read;

/// Retire stage: in-order retirement.
pub mod retire;

/// Writeback stage: broadcast cleanup.
pub mod writeback;
