use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Coarse shape of a field as seen by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Missing,
    Null,
    Text,
    EmptyText,
    Number,
    Boolean,
    Object,
    Array,
}

impl FieldKind {
    /// Shape of a value that is present. Absence is the caller's call to make.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => FieldKind::Null,
            Value::String(s) if s.trim().is_empty() => FieldKind::EmptyText,
            Value::String(_) => FieldKind::Text,
            Value::Number(_) => FieldKind::Number,
            Value::Bool(_) => FieldKind::Boolean,
            Value::Object(_) => FieldKind::Object,
            Value::Array(_) => FieldKind::Array,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Missing => "missing",
            FieldKind::Null => "null",
            FieldKind::Text => "text",
            FieldKind::EmptyText => "empty_text",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Object => "object",
            FieldKind::Array => "array",
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of one validation rule. A full run produces one outcome per rule,
/// pass or fail, so the ledger is complete even when an early rule fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub field: String,
    pub valid: bool,
    pub message: String,
    pub expected: FieldKind,
    pub actual: FieldKind,

    /// Offending value, elided for passing outcomes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl ValidationOutcome {
    pub fn pass(field: impl Into<String>, expected: FieldKind) -> Self {
        Self {
            field: field.into(),
            valid: true,
            message: String::new(),
            expected,
            actual: expected,
            value: None,
        }
    }

    pub fn fail(
        field: impl Into<String>,
        message: impl Into<String>,
        expected: FieldKind,
        actual: FieldKind,
    ) -> Self {
        Self {
            field: field.into(),
            valid: false,
            message: message.into(),
            expected,
            actual,
            value: None,
        }
    }

    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }
}
