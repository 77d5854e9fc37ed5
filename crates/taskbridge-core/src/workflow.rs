//! Workflow catalog entries.

use serde::{Deserialize, Serialize};

/// A workflow the downstream executor knows how to run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowSummary {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
}

impl WorkflowSummary {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: description.into(),
        }
    }
}

/// Catalog served when the downstream executor cannot be asked.
pub fn builtin_workflows() -> Vec<WorkflowSummary> {
    vec![
        WorkflowSummary::new(
            "dev-start",
            "Start development",
            "Prepare a workspace and kick off a development task.",
        ),
        WorkflowSummary::new(
            "hueter-dev-session",
            "Hueter dev session",
            "Open an interactive development session on the executor.",
        ),
    ]
}
