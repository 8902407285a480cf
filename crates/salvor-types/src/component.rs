use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What a display component renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Image,
    Text,
    Chart,
    Table,
    Error,
    Success,
    Warning,
    Debug,
}

impl ComponentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Image => "image",
            ComponentKind::Text => "text",
            ComponentKind::Chart => "chart",
            ComponentKind::Table => "table",
            ComponentKind::Error => "error",
            ComponentKind::Success => "success",
            ComponentKind::Warning => "warning",
            ComponentKind::Debug => "debug",
        }
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Presentation hints forwarded to whatever renders the component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderHints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<u32>,
}

impl RenderHints {
    pub fn is_empty(&self) -> bool {
        self.caption.is_none() && self.style.is_none() && self.max_width.is_none()
    }
}

/// One renderable unit of a processed result.
///
/// Ordering contract: ascending `priority` is render order, and components
/// with equal priority keep the order they were constructed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayComponent {
    pub kind: ComponentKind,

    pub content: Value,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,

    pub priority: u8,

    pub validation_passed: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub render_hints: Option<RenderHints>,
}

impl DisplayComponent {
    pub fn new(kind: ComponentKind, content: Value, priority: u8) -> Self {
        Self {
            kind,
            content,
            metadata: None,
            priority,
            validation_passed: true,
            render_hints: None,
        }
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_hints(mut self, hints: RenderHints) -> Self {
        if !hints.is_empty() {
            self.render_hints = Some(hints);
        }
        self
    }

    pub fn failed_validation(mut self) -> Self {
        self.validation_passed = false;
        self
    }
}

/// Sort components into render order. Stable, so ties keep insertion order.
pub fn sort_by_priority(components: &mut [DisplayComponent]) {
    components.sort_by_key(|component| component.priority);
}
