//! HTTP client for the downstream executor.
//!
//! Two calls are made against the executor's base URL:
//! - `POST /api/structured-tasks` to hand over a structured task
//! - `GET /api/workflows` to read the workflow catalog

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use taskbridge_core::{StructuredTask, WorkflowSummary};

const STRUCTURED_TASKS_PATH: &str = "/api/structured-tasks";
const WORKFLOWS_PATH: &str = "/api/workflows";

/// Result of a single forward attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardOutcome {
    /// The executor accepted the task.
    Delivered(u16),
    /// The executor answered with a non-success status.
    Rejected(u16),
    /// The request never completed.
    Transport(String),
}

impl ForwardOutcome {
    /// Short label used in logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Delivered(_) => "delivered",
            Self::Rejected(_) => "rejected",
            Self::Transport(_) => "failed",
        }
    }
}

/// Errors reading from the downstream executor.
#[derive(Debug, Error)]
pub enum DownstreamError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("downstream returned HTTP {0}")]
    Status(u16),

    #[error("unexpected response body: {0}")]
    Decode(String),
}

#[derive(Debug, Deserialize)]
struct WorkflowsResponse {
    workflows: Vec<WorkflowSummary>,
}

/// Client for the downstream executor.
#[derive(Debug, Clone)]
pub struct DownstreamClient {
    inner: reqwest::Client,
    base_url: String,
}

impl DownstreamClient {
    /// Create a new client.
    pub fn new(base_url: &str) -> Self {
        Self {
            inner: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The executor base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Hand a structured task to the executor, once.
    ///
    /// Never fails: every outcome is logged and returned as a value.
    pub async fn forward(&self, task: &StructuredTask) -> ForwardOutcome {
        let url = format!("{}{}", self.base_url, STRUCTURED_TASKS_PATH);
        debug!(url = %url, original_task_id = %task.original_task_id, "Forwarding structured task");

        let outcome = match self.inner.post(&url).json(task).send().await {
            Ok(response) if response.status().is_success() => {
                ForwardOutcome::Delivered(response.status().as_u16())
            }
            Ok(response) => ForwardOutcome::Rejected(response.status().as_u16()),
            Err(e) => ForwardOutcome::Transport(e.to_string()),
        };

        match &outcome {
            ForwardOutcome::Delivered(status) => info!(
                original_task_id = %task.original_task_id,
                status = *status,
                "Structured task delivered"
            ),
            ForwardOutcome::Rejected(status) => warn!(
                original_task_id = %task.original_task_id,
                status = *status,
                "Executor rejected structured task"
            ),
            ForwardOutcome::Transport(error) => warn!(
                original_task_id = %task.original_task_id,
                error = %error,
                "Failed to reach executor"
            ),
        }

        outcome
    }

    /// Read the workflow catalog.
    pub async fn list_workflows(&self) -> Result<Vec<WorkflowSummary>, DownstreamError> {
        let url = format!("{}{}", self.base_url, WORKFLOWS_PATH);
        debug!(url = %url, "GET request");

        let response = self
            .inner
            .get(&url)
            .send()
            .await
            .map_err(|e| DownstreamError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DownstreamError::Status(response.status().as_u16()));
        }

        let body: WorkflowsResponse = response
            .json()
            .await
            .map_err(|e| DownstreamError::Decode(e.to_string()))?;

        Ok(body.workflows)
    }
}
