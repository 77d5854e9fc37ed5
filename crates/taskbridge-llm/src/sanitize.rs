//! Markdown code-fence stripping.

const FENCE: &str = "```";

/// Strip a Markdown code fence wrapped around `text`.
///
/// If the trimmed text opens with a fence, the opening line (including any
/// language tag such as `json`) is dropped, then everything from the last
/// fence marker onward, and the remainder is trimmed. Unfenced text is only
/// trimmed.
///
/// Fence markers inside the payload are not escaped: a payload containing
/// a literal fence ends at the last one. A fenced text with no line break
/// has no body and yields an empty string.
pub fn strip_code_fences(text: &str) -> String {
    let trimmed = text.trim();
    if !trimmed.starts_with(FENCE) {
        return trimmed.to_string();
    }

    let Some(newline) = trimmed.find('\n') else {
        return String::new();
    };
    let body = &trimmed[newline + 1..];

    let body = match body.rfind(FENCE) {
        Some(end) => &body[..end],
        None => body,
    };

    body.trim().to_string()
}
