use serde_json::Value;

/// Truncate to `max_chars` characters, marking the cut.
///
/// Char-based so multi-byte content never splits mid-codepoint.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars).collect();
        format!("{}...(truncated)", kept)
    }
}

/// Compact single-line preview of a JSON value, for log lines.
pub fn value_snippet(value: &Value, max_chars: usize) -> String {
    let rendered = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    truncate(&rendered, max_chars)
}
