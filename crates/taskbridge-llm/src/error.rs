//! Error types for model calls.

use thiserror::Error;

/// Outcome of a failed call to the model provider.
#[derive(Debug, Clone, Error)]
pub enum ModelError {
    /// The request never completed (connection refused, DNS, reset, ...).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The provider answered with a non-success status.
    #[error("Provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The provider answered but the body was not JSON.
    #[error("Undecodable provider response: {0}")]
    Decode(String),

    /// The client could not be constructed.
    #[error("Client configuration error: {0}")]
    Config(String),
}
