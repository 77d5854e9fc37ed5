//! Workflow catalog and run start handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::warn;

use taskbridge_core::{builtin_workflows, WorkflowId};

use crate::state::AppState;

/// List workflows known to the executor, or the built-in catalog if the
/// executor cannot be asked.
pub async fn list_workflows(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let workflows = match state.downstream.list_workflows().await {
        Ok(workflows) => workflows,
        Err(e) => {
            warn!(error = %e, "Failed to fetch workflows, serving built-in list");
            builtin_workflows()
        }
    };

    Json(workflows)
}

/// Start a run of the given workflow.
pub async fn start_workflow(
    State(state): State<Arc<AppState>>,
    Path(workflow_id): Path<String>,
) -> impl IntoResponse {
    let run = state.runs.start(WorkflowId::new(workflow_id)).await;
    (StatusCode::ACCEPTED, Json(run))
}
