//! Prompts for task structuring.

use std::fmt::Write;

use taskbridge_core::time::iso_or_unknown;
use taskbridge_core::IncomingTask;

/// System instruction describing the structured task schema.
pub const SYSTEM_INSTRUCTION: &str = r#"You convert loosely written software tasks into a strict JSON record for an execution agent.

Return ONLY one JSON object with exactly these fields:
{
  "originalTaskId": string,
  "goal": string,
  "contextSummary": string,
  "knowledgeRequirements": string[],
  "subtasks": string[],
  "constraints": string[],
  "successCriteria": string[],
  "priority": "LOW" | "MEDIUM" | "HIGH" | "CRITICAL",
  "recommendedNextStep": "SEND_TO_EXECUTOR" | "ASK_HUMAN_FOR_INFO" | "NEEDS_DESIGN_DECISION" | "JUST_INFORMATION" | "UNKNOWN",
  "notesForExecutor": string,
  "notesForHuman": string (optional)
}

Rules:
1) Output plain JSON only. No prose before or after it.
2) Do not wrap the JSON in Markdown code fences.
3) Use the task id you are given as originalTaskId.
4) Do not add fields that are not listed above.
5) If the task is missing information, say so in notesForHuman and use ASK_HUMAN_FOR_INFO."#;

/// Build the per-task user instruction.
pub fn user_instruction(task: &IncomingTask) -> String {
    let mut prompt = String::new();
    writeln!(prompt, "Task metadata:").ok();
    writeln!(prompt, "- id: {}", task.id).ok();
    writeln!(prompt, "- author: {}", author_or_unknown(&task.author)).ok();
    writeln!(
        prompt,
        "- createdAt: {}",
        iso_or_unknown(task.created_at.as_ref())
    )
    .ok();
    prompt.push('\n');
    writeln!(prompt, "Task text:").ok();
    prompt.push_str(task.raw_text.trim());
    prompt.push_str("\n\nReturn the JSON object now.\n");
    prompt
}

fn author_or_unknown(author: &str) -> &str {
    if author.trim().is_empty() {
        "unknown"
    } else {
        author
    }
}
