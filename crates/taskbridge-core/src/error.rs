//! Core domain errors.

use thiserror::Error;

/// Core domain errors for TaskBridge.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Run not found.
    #[error("Run not found: {0}")]
    RunNotFound(String),
}
