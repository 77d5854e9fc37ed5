//! Task structuring for TaskBridge
//!
//! This crate turns a free-text [`IncomingTask`] into a [`StructuredTask`]
//! with a single call to a language model:
//!
//! 1. [`prompt`] builds the fixed system instruction and a per-task user
//!    instruction.
//! 2. A [`ModelClient`] issues the call and returns the raw response envelope.
//! 3. [`envelope`] pulls the first piece of model text out of the envelope.
//! 4. [`sanitize`] strips Markdown code fences around the JSON payload.
//! 5. [`TaskStructurer`] decodes the payload and settles `originalTaskId`.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use taskbridge_core::IncomingTask;
//! use taskbridge_llm::{HttpModelClient, HttpModelConfig, TaskStructurer};
//!
//! async fn run() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HttpModelClient::new(HttpModelConfig::new("sk-..."))?;
//!     let structurer = TaskStructurer::new(Arc::new(client));
//!
//!     let task = IncomingTask::new("t-1", "Add a dark mode toggle to settings");
//!     if let Some(structured) = structurer.structure(&task).await? {
//!         println!("goal: {}", structured.goal);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! [`IncomingTask`]: taskbridge_core::IncomingTask
//! [`StructuredTask`]: taskbridge_core::StructuredTask

mod client;
pub mod envelope;
mod error;
pub mod prompt;
pub mod sanitize;
mod structurer;

pub use client::{HttpModelClient, HttpModelConfig, MockModelClient, ModelClient, ModelRequest};
pub use envelope::{extract_text, Envelope};
pub use error::ModelError;
pub use sanitize::strip_code_fences;
pub use structurer::TaskStructurer;
