//! Free text to structured task, via one model call.

use std::sync::Arc;

use tracing::{debug, info, warn};

use taskbridge_core::{IncomingTask, StructuredTask, StructuredTaskDraft};

use crate::client::{ModelClient, ModelRequest};
use crate::envelope::extract_text;
use crate::error::ModelError;
use crate::prompt::{user_instruction, SYSTEM_INSTRUCTION};
use crate::sanitize::strip_code_fences;

/// Turns incoming tasks into structured tasks.
///
/// Without a model client the structurer is disabled and every call returns
/// `Ok(None)` without touching the network.
#[derive(Clone)]
pub struct TaskStructurer {
    client: Option<Arc<dyn ModelClient>>,
}

impl TaskStructurer {
    /// Create an enabled structurer.
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// Create a structurer with no model configured.
    pub fn disabled() -> Self {
        Self { client: None }
    }

    /// Returns true if a model client is configured.
    pub fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    /// Structure a task with exactly one model call.
    ///
    /// Returns `Ok(None)` when structuring is disabled, when no text can be
    /// extracted from the response envelope, or when the text does not decode
    /// as a structured task. Transport failures and non-success statuses are
    /// returned as `Err` for the caller to handle.
    pub async fn structure(
        &self,
        task: &IncomingTask,
    ) -> Result<Option<StructuredTask>, ModelError> {
        let Some(client) = &self.client else {
            info!(task_id = %task.id, "Model not configured, skipping structuring");
            return Ok(None);
        };

        let request = ModelRequest {
            instructions: SYSTEM_INSTRUCTION.to_string(),
            input: user_instruction(task),
        };

        debug!(task_id = %task.id, raw_len = task.raw_text.len(), "Requesting structured task");

        let envelope = match client.respond(request).await {
            Ok(envelope) => envelope,
            Err(ModelError::Decode(body)) => {
                warn!(task_id = %task.id, body = %body, "Model response body was not JSON");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let Some(text) = extract_text(&envelope) else {
            warn!(
                task_id = %task.id,
                envelope = %envelope,
                "No text output in model response"
            );
            return Ok(None);
        };

        let json = strip_code_fences(&text);
        match serde_json::from_str::<StructuredTaskDraft>(&json) {
            Ok(draft) => {
                let structured = draft.finish(&task.id);
                info!(
                    task_id = %task.id,
                    original_task_id = %structured.original_task_id,
                    subtasks = structured.subtasks.len(),
                    "Task structured"
                );
                Ok(Some(structured))
            }
            Err(e) => {
                warn!(
                    task_id = %task.id,
                    error = %e,
                    text = %json,
                    "Model output is not a valid structured task"
                );
                Ok(None)
            }
        }
    }
}
