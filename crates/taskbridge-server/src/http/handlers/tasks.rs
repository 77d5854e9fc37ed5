//! Task ingestion handler.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{info, warn};

use taskbridge_core::IncomingTask;

use crate::http::responses::{ApiError, IngestRequest, IngestResponse};
use crate::state::AppState;

/// Receive a task, structure it, and hand the result to the executor.
///
/// The forward runs detached on the state's tracker; its outcome never
/// changes the response.
pub async fn ingest_task(
    State(state): State<Arc<AppState>>,
    json_result: Result<Json<IngestRequest>, JsonRejection>,
) -> Response {
    let req = match json_result {
        Ok(Json(req)) => req,
        Err(rejection) => {
            warn!(error = %rejection, "Invalid JSON in request body");
            return ApiError::InvalidJson {
                message: rejection.body_text(),
            }
            .into_response();
        }
    };

    let raw = match req.task {
        Some(value) if !value.is_null() => value,
        _ => {
            warn!("Ingestion request without a task");
            return ApiError::MissingField { field: "task" }.into_response();
        }
    };

    let task: IncomingTask = match serde_json::from_value(raw) {
        Ok(task) => task,
        Err(e) => {
            warn!(error = %e, "Malformed task in ingestion request");
            return ApiError::InvalidField {
                field: "task",
                message: e.to_string(),
            }
            .into_response();
        }
    };

    state.counters.task_received();
    info!(task_id = %task.id, author = %task.author, "Task received");

    let structured = match state.structurer.structure(&task).await {
        Ok(structured) => structured,
        Err(e) => {
            warn!(task_id = %task.id, error = %e, "Structuring failed");
            None
        }
    };

    match &structured {
        Some(structured_task) => {
            state.counters.task_structured();

            let forward_state = state.clone();
            let forward_task = structured_task.clone();
            state.forwards.spawn(async move {
                let outcome = forward_state.downstream.forward(&forward_task).await;
                forward_state.counters.forward_finished(&outcome);
            });
        }
        None => {
            state.counters.task_unstructured();
            info!(task_id = %task.id, "No structured task produced");
        }
    }

    Json(IngestResponse::new(structured)).into_response()
}
