//! Incoming and structured task types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{NextStep, Priority, TaskId};

/// A task as produced by the upstream control plane.
///
/// Only `raw_text` is interpreted; `id`, `author` and `created_at` are passed
/// to the model as metadata. Everything else is carried opaquely, and only a
/// missing or mistyped `id` or `raw_text` fails to decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomingTask {
    /// Producer-assigned task identifier.
    pub id: TaskId,

    /// Producer-side state, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<Value>,

    /// When the producer created the task.
    #[serde(
        default,
        deserialize_with = "crate::time::deserialize_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,

    /// When the producer last touched the task, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Value>,

    /// Who wrote the task.
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,

    /// Natural-language task content.
    pub raw_text: String,
}

impl IncomingTask {
    /// Create a task with the given id and text.
    pub fn new(id: impl Into<TaskId>, raw_text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            state: None,
            created_at: None,
            updated_at: None,
            author: String::new(),
            raw_text: raw_text.into(),
        }
    }

    /// Builder method to set the author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Builder method to set the creation time.
    pub fn with_created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }
}

/// The normalized task record sent to the downstream executor.
///
/// `original_task_id` always equals the id of the [`IncomingTask`] it was
/// derived from unless the model supplied its own non-empty value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredTask {
    pub original_task_id: TaskId,
    pub goal: String,
    pub context_summary: String,
    pub knowledge_requirements: Vec<String>,
    pub subtasks: Vec<String>,
    pub constraints: Vec<String>,
    pub success_criteria: Vec<String>,
    pub priority: Priority,
    pub recommended_next_step: NextStep,
    pub notes_for_executor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes_for_human: Option<String>,
}

/// What the model is expected to return, before the task id is settled.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredTaskDraft {
    #[serde(default)]
    pub original_task_id: Option<String>,
    pub goal: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub context_summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub knowledge_requirements: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subtasks: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub constraints: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub success_criteria: Vec<String>,
    pub priority: Priority,
    pub recommended_next_step: NextStep,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes_for_executor: String,
    #[serde(default)]
    pub notes_for_human: Option<String>,
}

impl StructuredTaskDraft {
    /// Settle the draft into a [`StructuredTask`], falling back to `source_id`
    /// when the model left `originalTaskId` absent or blank.
    pub fn finish(self, source_id: &TaskId) -> StructuredTask {
        let original_task_id = match self.original_task_id.map(TaskId::new) {
            Some(id) if !id.is_blank() => id,
            _ => source_id.clone(),
        };

        StructuredTask {
            original_task_id,
            goal: self.goal,
            context_summary: self.context_summary,
            knowledge_requirements: self.knowledge_requirements,
            subtasks: self.subtasks,
            constraints: self.constraints,
            success_criteria: self.success_criteria,
            priority: self.priority,
            recommended_next_step: self.recommended_next_step,
            notes_for_executor: self.notes_for_executor,
            notes_for_human: self.notes_for_human,
        }
    }
}

/// Decode `null` as the type's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
