use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw tool invocation output as handed over by the orchestration layer.
///
/// Untrusted input: nothing about `content` is assumed until the validator
/// and parser have run. Consumed exactly once per `process` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawToolResult {
    /// Name of the tool that produced this output
    #[serde(alias = "name")]
    pub tool_name: String,

    /// Raw output text, expected (but not guaranteed) to be JSON
    pub content: String,
}

impl RawToolResult {
    pub fn new(tool_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            content: content.into(),
        }
    }

    /// Lenient construction from an arbitrary JSON envelope.
    ///
    /// Missing or non-string fields become empty/stringified values so the
    /// validation ledger can record the violation instead of this constructor
    /// rejecting the envelope outright.
    pub fn from_value(value: &Value) -> Self {
        let tool_name = value
            .get("tool_name")
            .or_else(|| value.get("name"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let content = match value.get("content") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };

        Self { tool_name, content }
    }
}
