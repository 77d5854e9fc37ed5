//! Helpers shared by the server tests.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use taskbridge_core::{NextStep, Priority, StructuredTask, TaskId};
use taskbridge_llm::TaskStructurer;

use crate::config::Config;
use crate::downstream::DownstreamClient;
use crate::state::AppState;

/// Loopback port 1 has no listener; connections are refused.
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:1";

/// Serve `router` on an ephemeral loopback port and return its base URL.
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// State with structuring disabled and an unreachable executor.
pub fn test_state() -> Arc<AppState> {
    state_with(TaskStructurer::disabled(), UNREACHABLE_URL)
}

/// State with the given structurer and executor URL.
pub fn state_with(structurer: TaskStructurer, downstream_url: &str) -> Arc<AppState> {
    let config = Config {
        downstream_url: downstream_url.to_string(),
        ..Config::default()
    };
    AppState::with_parts(config, structurer, DownstreamClient::new(downstream_url))
}

pub fn sample_structured_task(id: &str) -> StructuredTask {
    StructuredTask {
        original_task_id: TaskId::new(id),
        goal: "Stabilize the login test".to_string(),
        context_summary: "Fails one run in five".to_string(),
        knowledge_requirements: vec![],
        subtasks: vec!["find the race".to_string()],
        constraints: vec![],
        success_criteria: vec!["ten green runs".to_string()],
        priority: Priority::High,
        recommended_next_step: NextStep::SendToExecutor,
        notes_for_executor: String::new(),
        notes_for_human: None,
    }
}
