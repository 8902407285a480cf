mod data;

pub use data::{ChartData, DataValue, ImageRef, ImageSource, ResultData, TableData};

use serde::{Deserialize, Serialize};

/// Normalized tool result after strict parsing or recovery.
///
/// Every downstream consumer (views, components, telemetry) works from this
/// shape; nothing past the parser touches raw content again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalResult {
    /// Whether the tool reported success
    pub success: bool,

    /// Human-readable outcome message, empty when the tool supplied none
    #[serde(default)]
    pub message: String,

    /// Structured payload fields, classified per key
    #[serde(default)]
    pub data: ResultData,
}

impl CanonicalResult {
    pub fn new(success: bool, message: impl Into<String>, data: ResultData) -> Self {
        Self {
            success,
            message: message.into(),
            data,
        }
    }

    /// A failed result carrying only an explanatory message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: ResultData::new(),
        }
    }

    /// Dominant content shape, used to pick summary wording and components.
    pub fn content_kind(&self) -> ContentKind {
        let has_image = self.data.has_image();
        let has_chart = self.data.has_chart();
        let has_table = self.data.has_table();
        let typed = [has_image, has_chart, has_table]
            .iter()
            .filter(|present| **present)
            .count();

        match typed {
            0 if self.data.is_empty() => ContentKind::Empty,
            0 => ContentKind::Text,
            1 if has_image => ContentKind::Image,
            1 if has_chart => ContentKind::Chart,
            1 => ContentKind::Table,
            _ => ContentKind::Mixed,
        }
    }
}

/// Coarse classification of what a canonical result carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Image,
    Chart,
    Table,
    Text,
    Mixed,
    Empty,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Image => "image",
            ContentKind::Chart => "chart",
            ContentKind::Table => "table",
            ContentKind::Text => "text",
            ContentKind::Mixed => "mixed",
            ContentKind::Empty => "empty",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
