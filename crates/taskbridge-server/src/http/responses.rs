//! HTTP request and response types.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use taskbridge_core::StructuredTask;

// ============================================================================
// Ingestion types
// ============================================================================

/// Request body for the ingestion endpoint.
///
/// `task` is kept as a raw value so a missing task and a malformed task can
/// be reported separately.
#[derive(Debug, Deserialize)]
pub struct IngestRequest {
    #[serde(default)]
    pub task: Option<Value>,
}

/// Response body for the ingestion endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestResponse {
    pub ok: bool,
    pub received: bool,
    pub structured_task: Option<StructuredTask>,
}

impl IngestResponse {
    pub fn new(structured_task: Option<StructuredTask>) -> Self {
        Self {
            ok: true,
            received: true,
            structured_task,
        }
    }
}

// ============================================================================
// Health types
// ============================================================================

/// Response body for the health endpoint.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub service: &'static str,
    /// `"enabled"` or `"disabled"`.
    pub structuring: &'static str,
    /// Downstream executor base URL.
    pub downstream: String,
}

// ============================================================================
// Error types
// ============================================================================

/// Error response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
}

/// API errors with their HTTP status codes.
#[derive(Debug)]
pub enum ApiError {
    /// Request body is not valid JSON.
    InvalidJson { message: String },
    /// Missing required field.
    MissingField { field: &'static str },
    /// Invalid field value.
    InvalidField {
        field: &'static str,
        message: String,
    },
    /// Unknown run.
    RunNotFound { run_id: String },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error, run_id) = match self {
            ApiError::InvalidJson { message } => (
                StatusCode::BAD_REQUEST,
                format!("Invalid JSON body: {}", message),
                None,
            ),
            ApiError::MissingField { field } => (
                StatusCode::BAD_REQUEST,
                format!("Missing required field: {}", field),
                None,
            ),
            ApiError::InvalidField { field, message } => (
                StatusCode::BAD_REQUEST,
                format!("Invalid field '{}': {}", field, message),
                None,
            ),
            ApiError::RunNotFound { run_id } => (
                StatusCode::NOT_FOUND,
                "Run not found".to_string(),
                Some(run_id),
            ),
        };

        (status, Json(ErrorResponse { error, run_id })).into_response()
    }
}
