use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::canonical::CanonicalResult;

/// Failure taxonomy of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed input envelope. Caller contract violation, never retried.
    Validation,
    /// Strict parse failed. Not fatal by itself; triggers recovery.
    Parse,
    /// The recovery machinery itself broke down (only possible without a
    /// terminal fallback strategy in the chain).
    RecoveryExhausted,
    /// Unexpected failure after a canonical result already existed.
    Processing,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Parse => "parse",
            ErrorKind::RecoveryExhausted => "recovery_exhausted",
            ErrorKind::Processing => "processing",
        }
    }

    /// Whether retrying the same input could plausibly succeed.
    pub fn retryable(&self) -> bool {
        matches!(self, ErrorKind::RecoveryExhausted | ErrorKind::Processing)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structured error surfaced on a failed processed result.
///
/// `user_message` is safe to show verbatim; `technical_detail` is for logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub kind: ErrorKind,
    pub user_message: String,
    pub technical_detail: String,
    pub retryable: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggested_actions: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

impl ErrorInfo {
    pub fn new(
        kind: ErrorKind,
        user_message: impl Into<String>,
        technical_detail: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            user_message: user_message.into(),
            technical_detail: technical_detail.into(),
            retryable: kind.retryable(),
            suggested_actions: Vec::new(),
            context: None,
        }
    }

    pub fn with_actions<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suggested_actions = actions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self
    }
}

/// Outcome of one recovery strategy, recorded pass or fail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryAttempt {
    pub strategy: String,
    pub attempted_at: DateTime<Utc>,
    pub successful: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovered: Option<CanonicalResult>,
}

impl RecoveryAttempt {
    pub fn succeeded(strategy: impl Into<String>, recovered: CanonicalResult) -> Self {
        Self {
            strategy: strategy.into(),
            attempted_at: Utc::now(),
            successful: true,
            failure_message: None,
            recovered: Some(recovered),
        }
    }

    pub fn failed(strategy: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            strategy: strategy.into(),
            attempted_at: Utc::now(),
            successful: false,
            failure_message: Some(message.into()),
            recovered: None,
        }
    }
}
