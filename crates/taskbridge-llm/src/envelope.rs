//! Response envelope normalization.
//!
//! Provider response envelopes change shape between API versions. Text
//! extraction is confined to this module: everything downstream sees either
//! a plain string or nothing.
//!
//! Content items are searched in `output[*].content[*]` (Responses API) and
//! then in top-level `content[*]` (message-style APIs). Two item shapes are
//! recognized:
//!
//! ```text
//! {"type": "output_text", "text": "..."}            -> DirectText
//! {"type": "text", "text": {"value": "..."}}        -> NestedText
//! ```

use serde::Deserialize;
use serde_json::Value;

/// Known shapes of the first text-bearing content item in an envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Envelope {
    /// The item carries `text` as a plain string.
    DirectText(String),
    /// The item is typed as text output and carries `text.value`.
    NestedText(String),
    /// No content item matched a known shape.
    Unrecognized,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ContentItem {
    Direct {
        text: String,
    },
    Nested {
        #[serde(rename = "type")]
        kind: String,
        text: TextValue,
    },
}

#[derive(Deserialize)]
struct TextValue {
    value: String,
}

impl Envelope {
    /// Classify a raw envelope by the first content item with a known shape.
    pub fn classify(raw: &Value) -> Self {
        content_items(raw)
            .find_map(classify_item)
            .unwrap_or(Self::Unrecognized)
    }

    /// The extracted text, if any.
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::DirectText(text) | Self::NestedText(text) => Some(text),
            Self::Unrecognized => None,
        }
    }
}

/// Return the first piece of literal text in a provider envelope.
pub fn extract_text(raw: &Value) -> Option<String> {
    Envelope::classify(raw).into_text()
}

fn content_items(raw: &Value) -> impl Iterator<Item = &Value> {
    let from_output = raw
        .get("output")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|item| item.get("content").and_then(Value::as_array))
        .flatten();

    let top_level = raw
        .get("content")
        .and_then(Value::as_array)
        .into_iter()
        .flatten();

    from_output.chain(top_level)
}

fn classify_item(item: &Value) -> Option<Envelope> {
    match ContentItem::deserialize(item).ok()? {
        ContentItem::Direct { text } => Some(Envelope::DirectText(text)),
        ContentItem::Nested { kind, text } if is_text_kind(&kind) => {
            Some(Envelope::NestedText(text.value))
        }
        ContentItem::Nested { .. } => None,
    }
}

fn is_text_kind(kind: &str) -> bool {
    matches!(kind, "text" | "output_text")
}
