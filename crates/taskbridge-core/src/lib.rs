//! TaskBridge Core Domain Types
//!
//! This crate contains pure domain types with no dependencies on:
//! - Network/HTTP
//! - Model providers
//! - Runtime specifics
//!
//! All types here represent the data exchanged between the task producer,
//! the bridge, and the downstream executor.

pub mod error;
pub mod ids;
pub mod run;
pub mod status;
pub mod task;
pub mod time;
pub mod workflow;

// Re-export commonly used types
pub use error::CoreError;
pub use ids::{RunId, TaskId, WorkflowId};
pub use run::{Run, RunStep};
pub use status::{NextStep, Priority, RunStatus, StepState};
pub use task::{IncomingTask, StructuredTask, StructuredTaskDraft};
pub use workflow::{builtin_workflows, WorkflowSummary};
