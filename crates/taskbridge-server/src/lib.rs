//! TaskBridge Server Library
//!
//! This crate provides the HTTP surface of TaskBridge: task ingestion and
//! structuring, best-effort forwarding to the downstream executor, the
//! workflow catalog, and in-memory run tracking.

pub mod config;
pub mod downstream;
pub mod http;
pub mod metrics;
pub mod runs;
pub mod state;

#[cfg(test)]
mod test_support;

pub use config::Config;
pub use downstream::{DownstreamClient, DownstreamError, ForwardOutcome};
pub use runs::{RunController, RunRegistry};
pub use state::AppState;
