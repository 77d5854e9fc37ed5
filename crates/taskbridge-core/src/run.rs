//! Workflow run types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{RunId, RunStatus, StepState, WorkflowId};

/// One step of a run's plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStep {
    /// Step identifier, `<workflow>-step-<n>`.
    pub id: String,

    /// Current step state.
    pub state: StepState,
}

impl RunStep {
    /// Create a new step.
    pub fn new(id: impl Into<String>, state: StepState) -> Self {
        Self {
            id: id.into(),
            state,
        }
    }

    /// Move the step to a new state.
    ///
    /// Nothing in the bridge advances steps; this exists for the executor
    /// that eventually reports step progress.
    pub fn set_state(&mut self, state: StepState) {
        self.state = state;
    }
}

/// One invocation of a named workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    pub run_id: RunId,
    pub workflow_id: WorkflowId,
    pub status: RunStatus,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub steps: Vec<RunStep>,
}

impl Run {
    /// Derive the base run id for a workflow started at `started_at`.
    pub fn base_id(started_at: DateTime<Utc>, workflow_id: &WorkflowId) -> RunId {
        RunId::new(format!(
            "run-{}-{}",
            started_at.timestamp_millis(),
            workflow_id
        ))
    }

    /// Build a freshly started run with the default two-step plan: the first
    /// step running, the second pending.
    pub fn started(run_id: RunId, workflow_id: WorkflowId, started_at: DateTime<Utc>) -> Self {
        let steps = vec![
            RunStep::new(format!("{}-step-1", workflow_id), StepState::Running),
            RunStep::new(format!("{}-step-2", workflow_id), StepState::Pending),
        ];

        Self {
            run_id,
            workflow_id,
            status: RunStatus::Running,
            started_at,
            finished_at: None,
            steps,
        }
    }
}
