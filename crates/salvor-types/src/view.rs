use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::canonical::ContentKind;

/// Error shape shared by both views when the canonical result failed.
///
/// `error` and `recoverable` are structurally always true; they are real
/// fields (not serde constants) so consumers deserializing the view get the
/// same document shape they would read off the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorShape {
    pub error: bool,
    pub message: String,
    pub recoverable: bool,
    pub timestamp: DateTime<Utc>,
}

impl ErrorShape {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: true,
            message: message.into(),
            recoverable: true,
            timestamp: Utc::now(),
        }
    }
}

/// Presence flags and sizing for the context summary. Large payload fields
/// are represented here by flags only, never by their bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetadata {
    pub has_image: bool,
    pub has_data: bool,
    pub content_kind: ContentKind,
    pub size: usize,
}

/// Success shape of the context summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextReport {
    pub success: bool,
    pub tool: String,
    pub message: String,
    pub metadata: SummaryMetadata,
}

/// Compact, size-bounded view for consumers with strict token budgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextView {
    Report(ContextReport),
    Error(ErrorShape),
}

impl ContextView {
    pub fn is_error(&self) -> bool {
        matches!(self, ContextView::Error(_))
    }
}

/// Sizing and media validation recorded alongside the full payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadMetadata {
    pub payload_bytes: usize,

    /// Unset when the payload carries no media reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_valid: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_invalid_reason: Option<String>,
}

/// Success shape of the display payload: every payload field at full
/// fidelity plus derived flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullPayload {
    pub data: Value,
    pub has_image: bool,
    pub has_chart: bool,
    pub has_table: bool,
    pub metadata: PayloadMetadata,
}

/// Full-fidelity view for the display layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DisplayPayload {
    Full(FullPayload),
    Error(ErrorShape),
}

impl DisplayPayload {
    pub fn is_error(&self) -> bool {
        matches!(self, DisplayPayload::Error(_))
    }

    pub fn as_full(&self) -> Option<&FullPayload> {
        match self {
            DisplayPayload::Full(payload) => Some(payload),
            DisplayPayload::Error(_) => None,
        }
    }
}
