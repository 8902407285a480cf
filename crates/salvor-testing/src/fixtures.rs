//! Raw tool-result payloads covering the recovery spectrum.
//!
//! Each fixture is a `content` string for a [`RawToolResult`] envelope,
//! ordered from pristine to hopeless: strict parse, recovery by field
//! extraction, by flag extraction, by structural repair, by prefix salvage,
//! terminal fallback, and outright validation failure.
//!
//! [`RawToolResult`]: salvor_types::RawToolResult

use std::fs;
use std::path::Path;

use anyhow::Result;
use serde_json::json;

/// Well-formed success payload with a plain data object. Parses strictly.
pub fn clean_success() -> &'static str {
    r#"{"success":true,"message":"operation completed","data":{"value":7}}"#
}

/// Well-formed success payload carrying a valid data-URI image reference.
pub fn image_success() -> &'static str {
    r#"{"success":true,"message":"render complete","data":{"image_url":"data:image/png;base64,iVBORw0KGgoAAAANSUhEUg=="}}"#
}

/// Well-formed failure payload. Parses strictly into the error shape.
pub fn failed_tool() -> &'static str {
    r#"{"success":false,"message":"permission denied"}"#
}

/// Truncated mid-value, but the image reference survives intact.
pub fn truncated_image() -> &'static str {
    r#"{"success":true,"message":"upload finished","data":{"image_url":"data:image/png;base64,iVBORw0KGg"#
}

/// Truncated with no media and no success flag; only structural repair of
/// the unterminated string and brace makes it parse.
pub fn truncated_text() -> &'static str {
    r#"{"status":"done","message":"half the story"#
}

/// Valid prefix followed by a corrupt tail; only prefix salvage applies.
pub fn broken_tail() -> &'static str {
    r#"{"items":[1,2,3],"tail":zz"#
}

/// Unsalvageable content. Only the terminal fallback accepts it.
pub fn garbage() -> &'static str {
    "<<<binary soup>>>"
}

/// Empty content fails validation before parsing is ever attempted.
pub fn empty() -> &'static str {
    ""
}

/// The whole spectrum as `(label, content)` pairs, most intact first.
pub fn spectrum() -> Vec<(&'static str, &'static str)> {
    vec![
        ("clean_success", clean_success()),
        ("image_success", image_success()),
        ("failed_tool", failed_tool()),
        ("truncated_image", truncated_image()),
        ("truncated_text", truncated_text()),
        ("broken_tail", broken_tail()),
        ("garbage", garbage()),
        ("empty", empty()),
    ]
}

/// Serialize one raw envelope as a JSONL line.
pub fn envelope(tool_name: &str, content: &str) -> String {
    json!({ "tool_name": tool_name, "content": content }).to_string()
}

/// Write raw envelopes to a JSONL file, one per line.
pub fn write_jsonl(path: &Path, envelopes: &[(&str, &str)]) -> Result<()> {
    let lines: Vec<String> = envelopes
        .iter()
        .map(|(tool, content)| envelope(tool, content))
        .collect();
    fs::write(path, lines.join("\n") + "\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_envelope_line_is_valid_json() {
        let line = envelope("render_image", truncated_image());
        let value: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["tool_name"], "render_image");
        assert_eq!(value["content"], truncated_image());
    }

    #[test]
    fn test_spectrum_labels_are_unique() {
        let mut labels: Vec<_> = spectrum().into_iter().map(|(label, _)| label).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), 8);
    }
}
