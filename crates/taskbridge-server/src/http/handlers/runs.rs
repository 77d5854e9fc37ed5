//! Run query handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};

use taskbridge_core::RunId;

use crate::http::responses::ApiError;
use crate::state::AppState;

/// Get a single run.
pub async fn get_run(
    State(state): State<Arc<AppState>>,
    Path(run_id): Path<String>,
) -> Response {
    match state.runs.get(&RunId::new(run_id.clone())).await {
        Ok(run) => Json(run).into_response(),
        Err(_) => ApiError::RunNotFound { run_id }.into_response(),
    }
}

/// List all runs.
pub async fn list_runs(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.runs.list().await)
}
