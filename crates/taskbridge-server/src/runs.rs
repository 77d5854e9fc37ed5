//! In-memory run registry and run lifecycle.
//!
//! Runs are recorded when a workflow is started and are never advanced by
//! the bridge. Nothing is persisted; a restart forgets every run.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info};

use taskbridge_core::{CoreError, Run, RunId, RunStatus, WorkflowId};

/// Runs indexed by RunId.
#[derive(Default)]
pub struct RunRegistry {
    runs: RwLock<HashMap<RunId, Run>>,
}

impl RunRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a run built from the first free id derived from `base`.
    ///
    /// `base` is used as is when free; otherwise `-2`, `-3`, ... is appended
    /// until an unused id is found. Existing runs are never replaced.
    pub async fn insert_unique<F>(&self, base: RunId, build: F) -> Run
    where
        F: FnOnce(RunId) -> Run,
    {
        let mut runs = self.runs.write().await;

        let mut candidate = base.clone();
        let mut suffix = 2u32;
        while runs.contains_key(&candidate) {
            candidate = RunId::new(format!("{}-{}", base, suffix));
            suffix += 1;
        }

        if candidate != base {
            debug!(base = %base, run_id = %candidate, "Run id taken, using suffixed id");
        }

        let run = build(candidate.clone());
        runs.insert(candidate, run.clone());
        run
    }

    /// Look up a run.
    pub async fn get(&self, run_id: &RunId) -> Option<Run> {
        self.runs.read().await.get(run_id).cloned()
    }

    /// Snapshot of all runs, in map order.
    pub async fn list(&self) -> Vec<Run> {
        self.runs.read().await.values().cloned().collect()
    }

    /// Number of recorded runs.
    pub async fn len(&self) -> usize {
        self.runs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.runs.read().await.is_empty()
    }

    /// Number of runs per status, every status included.
    pub async fn count_by_status(&self) -> Vec<(RunStatus, u64)> {
        let runs = self.runs.read().await;
        RunStatus::ALL
            .iter()
            .map(|status| {
                let n = runs.values().filter(|run| run.status == *status).count() as u64;
                (*status, n)
            })
            .collect()
    }
}

/// Starts runs and answers run queries.
#[derive(Clone, Default)]
pub struct RunController {
    registry: Arc<RunRegistry>,
}

impl RunController {
    pub fn new(registry: Arc<RunRegistry>) -> Self {
        Self { registry }
    }

    /// The underlying registry.
    pub fn registry(&self) -> &Arc<RunRegistry> {
        &self.registry
    }

    /// Start a run of `workflow_id` now.
    ///
    /// Any workflow id is accepted; the catalog is not consulted.
    pub async fn start(&self, workflow_id: WorkflowId) -> Run {
        self.start_at(workflow_id, Utc::now()).await
    }

    /// Start a run of `workflow_id` with an explicit start time.
    pub async fn start_at(&self, workflow_id: WorkflowId, started_at: DateTime<Utc>) -> Run {
        let base = Run::base_id(started_at, &workflow_id);
        let run = self
            .registry
            .insert_unique(base, |run_id| {
                Run::started(run_id, workflow_id, started_at)
            })
            .await;

        info!(
            run_id = %run.run_id,
            workflow_id = %run.workflow_id,
            "Run started"
        );
        run
    }

    /// Fetch a run by id.
    pub async fn get(&self, run_id: &RunId) -> Result<Run, CoreError> {
        self.registry
            .get(run_id)
            .await
            .ok_or_else(|| CoreError::RunNotFound(run_id.to_string()))
    }

    /// All recorded runs.
    pub async fn list(&self) -> Vec<Run> {
        self.registry.list().await
    }
}
