//! Prometheus metrics collection and formatting.
//!
//! This module provides metrics in Prometheus text exposition format.

use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::downstream::ForwardOutcome;
use crate::state::AppState;

/// Process-lifetime counters for ingestion and forwarding.
#[derive(Debug, Default)]
pub struct Counters {
    tasks_received: AtomicU64,
    tasks_structured: AtomicU64,
    tasks_unstructured: AtomicU64,
    forwards_delivered: AtomicU64,
    forwards_rejected: AtomicU64,
    forwards_failed: AtomicU64,
}

impl Counters {
    pub fn task_received(&self) {
        self.tasks_received.fetch_add(1, Ordering::Relaxed);
    }

    pub fn task_structured(&self) {
        self.tasks_structured.fetch_add(1, Ordering::Relaxed);
    }

    pub fn task_unstructured(&self) {
        self.tasks_unstructured.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the outcome of one forward.
    pub fn forward_finished(&self, outcome: &ForwardOutcome) {
        let counter = match outcome {
            ForwardOutcome::Delivered(_) => &self.forwards_delivered,
            ForwardOutcome::Rejected(_) => &self.forwards_rejected,
            ForwardOutcome::Transport(_) => &self.forwards_failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn tasks_received(&self) -> u64 {
        self.tasks_received.load(Ordering::Relaxed)
    }

    pub fn tasks_structured(&self) -> u64 {
        self.tasks_structured.load(Ordering::Relaxed)
    }

    pub fn tasks_unstructured(&self) -> u64 {
        self.tasks_unstructured.load(Ordering::Relaxed)
    }

    /// Forward counts as `(outcome label, count)`.
    pub fn forwards(&self) -> [(&'static str, u64); 3] {
        [
            ("delivered", self.forwards_delivered.load(Ordering::Relaxed)),
            ("rejected", self.forwards_rejected.load(Ordering::Relaxed)),
            ("failed", self.forwards_failed.load(Ordering::Relaxed)),
        ]
    }
}

/// Collect all metrics from AppState and format as Prometheus text.
pub async fn collect_metrics(state: &Arc<AppState>) -> String {
    let mut output = String::new();

    collect_run_metrics(state, &mut output).await;
    collect_task_metrics(state, &mut output);
    collect_forward_metrics(state, &mut output);

    output
}

/// Collect run metrics by status.
async fn collect_run_metrics(state: &Arc<AppState>, output: &mut String) {
    let counts = state.runs.registry().count_by_status().await;

    writeln!(
        output,
        "# HELP taskbridge_runs_total Number of recorded runs by status"
    )
    .ok();
    writeln!(output, "# TYPE taskbridge_runs_total gauge").ok();
    for (status, count) in counts {
        writeln!(output, "taskbridge_runs_total{{status=\"{status}\"}} {count}").ok();
    }
}

/// Collect ingestion counters.
fn collect_task_metrics(state: &Arc<AppState>, output: &mut String) {
    let counters = &state.counters;
    let series = [
        (
            "taskbridge_tasks_received_total",
            "Tasks received on the ingestion endpoint",
            counters.tasks_received(),
        ),
        (
            "taskbridge_tasks_structured_total",
            "Tasks the model turned into a structured task",
            counters.tasks_structured(),
        ),
        (
            "taskbridge_tasks_unstructured_total",
            "Tasks answered without a structured task",
            counters.tasks_unstructured(),
        ),
    ];

    for (name, help, value) in series {
        writeln!(output).ok();
        writeln!(output, "# HELP {name} {help}").ok();
        writeln!(output, "# TYPE {name} counter").ok();
        writeln!(output, "{name} {value}").ok();
    }
}

/// Collect forward counters by outcome.
fn collect_forward_metrics(state: &Arc<AppState>, output: &mut String) {
    writeln!(output).ok();
    writeln!(
        output,
        "# HELP taskbridge_forwards_total Forwards to the executor by outcome"
    )
    .ok();
    writeln!(output, "# TYPE taskbridge_forwards_total counter").ok();
    for (outcome, count) in state.counters.forwards() {
        writeln!(
            output,
            "taskbridge_forwards_total{{outcome=\"{outcome}\"}} {count}"
        )
        .ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_state;
    use taskbridge_core::WorkflowId;

    #[tokio::test]
    async fn test_collect_metrics_empty_state() {
        let state = test_state();
        let output = collect_metrics(&state).await;

        assert!(output.contains("# TYPE taskbridge_runs_total gauge"));
        assert!(output.contains("taskbridge_runs_total{status=\"running\"} 0"));
        assert!(output.contains("taskbridge_tasks_received_total 0"));
        assert!(output.contains("taskbridge_forwards_total{outcome=\"failed\"} 0"));
    }

    #[tokio::test]
    async fn test_collect_metrics_counts() {
        let state = test_state();
        state.runs.start(WorkflowId::new("dev-start")).await;
        state.counters.task_received();
        state.counters.task_received();
        state.counters.task_structured();
        state
            .counters
            .forward_finished(&ForwardOutcome::Rejected(500));

        let output = collect_metrics(&state).await;
        assert!(output.contains("taskbridge_runs_total{status=\"running\"} 1"));
        assert!(output.contains("taskbridge_tasks_received_total 2"));
        assert!(output.contains("taskbridge_tasks_structured_total 1"));
        assert!(output.contains("taskbridge_tasks_unstructured_total 0"));
        assert!(output.contains("taskbridge_forwards_total{outcome=\"rejected\"} 1"));
    }
}
