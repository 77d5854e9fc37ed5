//! HTTP server for the bridge.
//!
//! Provides endpoints for:
//! - Task ingestion (`/tasks/from-mfc`)
//! - Workflow catalog and run start (`/workflows`, `/workflows/:id/start`)
//! - Run queries (`/runs`, `/runs/:runId`)
//! - Health check (`/health`)
//! - Prometheus metrics (`/metrics`)

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

mod handlers;
pub mod responses;

/// Create the HTTP router.
pub fn create_router(state: Arc<AppState>) -> Router {
    // Browser dashboards call the API cross-origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // API routes
        .route("/tasks/from-mfc", post(handlers::ingest_task))
        .route("/workflows", get(handlers::list_workflows))
        .route("/workflows/:id/start", post(handlers::start_workflow))
        .route("/runs", get(handlers::list_runs))
        .route("/runs/:run_id", get(handlers::get_run))
        // Observability routes
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{serve, state_with, test_state, UNREACHABLE_URL};
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        Json,
    };
    use serde_json::{json, Value};
    use taskbridge_llm::{MockModelClient, ModelError, TaskStructurer};
    use tower::ServiceExt;

    const MODEL_JSON: &str = r#"{
        "goal": "Make login tests stable",
        "contextSummary": "CI fails intermittently",
        "knowledgeRequirements": [],
        "subtasks": ["find race"],
        "constraints": [],
        "successCriteria": ["10 green runs"],
        "priority": "HIGH",
        "recommendedNextStep": "SEND_TO_EXECUTOR",
        "notesForExecutor": ""
    }"#;

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn ingest(body: Value) -> Request<Body> {
        post_json("/tasks/from-mfc", &body.to_string())
    }

    fn task_body() -> Value {
        json!({"task": {"id": "t-42", "rawText": "login test is flaky", "author": "dana"}})
    }

    fn structuring(client: MockModelClient) -> TaskStructurer {
        TaskStructurer::new(Arc::new(client))
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(create_router(test_state()), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(body["service"], "taskbridge");
        assert_eq!(body["structuring"], "disabled");
        assert_eq!(body["downstream"], UNREACHABLE_URL);
    }

    #[tokio::test]
    async fn test_ingest_without_task_is_400() {
        let (status, body) = send(create_router(test_state()), ingest(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("task"));

        let (status, _) = send(create_router(test_state()), ingest(json!({"task": null}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_ingest_invalid_json_is_400() {
        let (status, body) = send(
            create_router(test_state()),
            post_json("/tasks/from-mfc", "{not json"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_ingest_malformed_task_is_400() {
        for task in [
            json!({"id": "t-1"}),
            json!({"rawText": "fix it"}),
            json!({"id": "t-1", "rawText": 42}),
        ] {
            let (status, _) =
                send(create_router(test_state()), ingest(json!({ "task": task.clone() }))).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{task}");
        }
    }

    #[tokio::test]
    async fn test_ingest_accepts_loose_metadata() {
        let tasks = [
            json!({"id": "t-1", "rawText": "fix it", "author": null}),
            json!({"id": "t-1", "rawText": "fix it", "updatedAt": "2024-05-01 10:00:00"}),
            json!({"id": "t-1", "rawText": "fix it", "createdAt": "2024-05-01"}),
            json!({"id": "t-1", "rawText": "fix it", "createdAt": "last tuesday"}),
            json!({"id": "t-1", "rawText": "fix it", "state": {"name": "open"}}),
        ];

        for task in tasks {
            let (status, body) =
                send(create_router(test_state()), ingest(json!({ "task": task.clone() }))).await;
            assert_eq!(status, StatusCode::OK, "{task}");
            assert_eq!(body["received"], true, "{task}");
        }
    }

    #[tokio::test]
    async fn test_ingest_loose_metadata_still_structures() {
        let client = Arc::new(MockModelClient::replying_text(MODEL_JSON));
        let state = state_with(TaskStructurer::new(client.clone()), UNREACHABLE_URL);
        let task = json!({"task": {
            "id": "t-9",
            "rawText": "fix it",
            "author": null,
            "createdAt": "2024-05-01",
            "state": {"name": "open"}
        }});

        let (status, body) = send(create_router(state), ingest(task)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["structuredTask"]["originalTaskId"], "t-9");
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn test_ingest_disabled_returns_null_task() {
        let state = test_state();
        let (status, body) = send(create_router(state.clone()), ingest(task_body())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"ok": true, "received": true, "structuredTask": null})
        );
        assert_eq!(state.counters.tasks_received(), 1);
        assert_eq!(state.counters.tasks_unstructured(), 1);
    }

    #[tokio::test]
    async fn test_ingest_model_failure_returns_null_task() {
        let client = Arc::new(MockModelClient::failing(ModelError::Transport(
            "connection reset".to_string(),
        )));
        let state = state_with(TaskStructurer::new(client.clone()), UNREACHABLE_URL);

        let (status, body) = send(create_router(state.clone()), ingest(task_body())).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["structuredTask"].is_null());
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn test_ingest_unparseable_model_output_returns_null_task() {
        let state = state_with(
            structuring(MockModelClient::replying_text("I could not do that.")),
            UNREACHABLE_URL,
        );
        let (status, body) = send(create_router(state), ingest(task_body())).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["structuredTask"].is_null());
    }

    #[tokio::test]
    async fn test_ingest_forward_rejected_does_not_surface() {
        let downstream = serve(Router::new().route(
            "/api/structured-tasks",
            axum::routing::post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        ))
        .await;
        let state = state_with(
            structuring(MockModelClient::replying_text(MODEL_JSON)),
            &downstream,
        );

        let (status, body) = send(create_router(state.clone()), ingest(task_body())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["structuredTask"]["originalTaskId"], "t-42");
        assert_eq!(body["structuredTask"]["priority"], "HIGH");

        state.forwards.close();
        state.forwards.wait().await;
        assert_eq!(state.counters.forwards()[1], ("rejected", 1));
    }

    #[tokio::test]
    async fn test_ingest_forward_refused_does_not_surface() {
        let state = state_with(
            structuring(MockModelClient::replying_text(MODEL_JSON)),
            UNREACHABLE_URL,
        );

        let (status, body) = send(create_router(state.clone()), ingest(task_body())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["structuredTask"]["goal"], "Make login tests stable");

        state.forwards.close();
        state.forwards.wait().await;
        assert_eq!(state.counters.forwards()[2], ("failed", 1));
        assert_eq!(state.counters.tasks_structured(), 1);
    }

    #[tokio::test]
    async fn test_ingest_forward_delivers_structured_task() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<Value>();
        let downstream = serve(Router::new().route(
            "/api/structured-tasks",
            axum::routing::post(move |Json(body): Json<Value>| {
                let tx = tx.clone();
                async move {
                    tx.send(body).ok();
                    StatusCode::OK
                }
            }),
        ))
        .await;
        let state = state_with(
            structuring(MockModelClient::replying_text(MODEL_JSON)),
            &downstream,
        );

        let (status, _) = send(create_router(state.clone()), ingest(task_body())).await;
        assert_eq!(status, StatusCode::OK);

        let forwarded = rx.recv().await.unwrap();
        assert_eq!(forwarded["originalTaskId"], "t-42");
        assert_eq!(forwarded["recommendedNextStep"], "SEND_TO_EXECUTOR");
    }

    #[tokio::test]
    async fn test_workflows_fall_back_to_builtin() {
        let (status, body) = send(create_router(test_state()), get("/workflows")).await;
        assert_eq!(status, StatusCode::OK);

        let ids: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|w| w["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["dev-start", "hueter-dev-session"]);
    }

    #[tokio::test]
    async fn test_workflows_from_downstream() {
        let downstream = serve(Router::new().route(
            "/api/workflows",
            axum::routing::get(|| async {
                Json(json!({"workflows": [{"id": "deploy", "label": "Deploy"}]}))
            }),
        ))
        .await;
        let state = state_with(TaskStructurer::disabled(), &downstream);

        let (status, body) = send(create_router(state), get("/workflows")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["id"], "deploy");
        assert_eq!(body[0]["description"], "");
    }

    #[tokio::test]
    async fn test_start_and_get_run() {
        let state = test_state();
        let router = create_router(state.clone());

        let (status, run) = send(
            router.clone(),
            post_json("/workflows/dev-start/start", ""),
        )
        .await;
        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(run["workflowId"], "dev-start");
        assert_eq!(run["status"], "running");
        assert!(run["finishedAt"].is_null());
        assert_eq!(run["steps"][0], json!({"id": "dev-start-step-1", "state": "running"}));
        assert_eq!(run["steps"][1], json!({"id": "dev-start-step-2", "state": "pending"}));

        let run_id = run["runId"].as_str().unwrap();
        assert!(run_id.starts_with("run-"));
        assert!(run_id.ends_with("-dev-start"));

        let (status, fetched) = send(router.clone(), get(&format!("/runs/{run_id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, run);

        let (status, list) = send(router, get("/runs")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_run_is_404() {
        let (status, body) = send(create_router(test_state()), get("/runs/run-0-nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Run not found");
        assert_eq!(body["runId"], "run-0-nope");
    }

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let response = create_router(test_state())
            .oneshot(get("/metrics"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.contains("taskbridge_runs_total"));
    }
}
