//! Status enums for runs, run steps, and structured tasks.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Status of a workflow run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// Run recorded but not yet started.
    #[default]
    Pending,
    /// Run is in progress.
    Running,
    /// Run finished successfully.
    Done,
    /// Run finished with an error.
    Error,
}

impl RunStatus {
    /// All variants, in lifecycle order.
    pub const ALL: [RunStatus; 4] = [Self::Pending, Self::Running, Self::Done, Self::Error];

    /// Lower-case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Done => "done",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of a single step within a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepState {
    #[default]
    Pending,
    Running,
    Done,
    Error,
}

impl StepState {
    /// Lower-case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Done => "done",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for StepState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Urgency assigned to a structured task.
///
/// Decoding ignores case, so `"high"` and `"High"` read as [`Priority::High`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match wire_name(&raw).as_str() {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            "CRITICAL" => Ok(Self::Critical),
            _ => Err(serde::de::Error::unknown_variant(
                &raw,
                &["LOW", "MEDIUM", "HIGH", "CRITICAL"],
            )),
        }
    }
}

/// What the bridge recommends doing with a structured task.
///
/// Decoding ignores case and accepts spaces or dashes for underscores.
/// Values the model invents outside this set decode as [`NextStep::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NextStep {
    SendToExecutor,
    AskHumanForInfo,
    NeedsDesignDecision,
    JustInformation,
    Unknown,
}

impl<'de> Deserialize<'de> for NextStep {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(match wire_name(&raw).as_str() {
            "SEND_TO_EXECUTOR" => Self::SendToExecutor,
            "ASK_HUMAN_FOR_INFO" => Self::AskHumanForInfo,
            "NEEDS_DESIGN_DECISION" => Self::NeedsDesignDecision,
            "JUST_INFORMATION" => Self::JustInformation,
            _ => Self::Unknown,
        })
    }
}

/// Normalize a model-written enum value to its SCREAMING_SNAKE form.
fn wire_name(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect()
}
