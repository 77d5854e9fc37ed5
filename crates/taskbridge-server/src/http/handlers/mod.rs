//! HTTP request handlers.

mod health;
mod runs;
mod tasks;
mod workflows;

pub use health::{health_check, metrics_handler};
pub use runs::{get_run, list_runs};
pub use tasks::ingest_task;
pub use workflows::{list_workflows, start_workflow};
