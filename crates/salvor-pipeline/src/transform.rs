use salvor_types::{
    CanonicalResult, ContextReport, ContextView, DisplayPayload, ErrorShape, FullPayload,
    PayloadMetadata, SummaryMetadata, truncate,
};

use crate::config::PipelineConfig;
use crate::{Error, Result};

/// Both derived views plus the bounded summary document.
///
/// Everything in here comes from one `CanonicalResult`; raw content is never
/// consulted again past the parser.
#[derive(Debug, Clone)]
pub struct Views {
    pub context: ContextView,
    pub summary: String,
    pub display: DisplayPayload,
}

/// Derive both views from one canonical result.
pub fn build_views(
    canonical: &CanonicalResult,
    tool_name: &str,
    config: &PipelineConfig,
) -> Result<Views> {
    let display = display_payload(canonical, config);
    let (context, summary) = bounded_context(canonical, tool_name, config.summary_max_bytes)?;
    Ok(Views {
        context,
        summary,
        display,
    })
}

fn display_payload(canonical: &CanonicalResult, config: &PipelineConfig) -> DisplayPayload {
    if !canonical.success {
        return DisplayPayload::Error(ErrorShape::new(canonical.message.clone()));
    }

    let data = canonical.data.to_value();
    let payload_bytes = data.to_string().len();

    let (image_valid, image_invalid_reason) = match canonical.data.image() {
        Some(image) if config.validate_media => match image.validate() {
            Ok(()) => (Some(true), None),
            Err(reason) => (Some(false), Some(reason)),
        },
        _ => (None, None),
    };

    DisplayPayload::Full(FullPayload {
        data,
        has_image: canonical.data.has_image(),
        has_chart: canonical.data.has_chart(),
        has_table: canonical.data.has_table(),
        metadata: PayloadMetadata {
            payload_bytes,
            image_valid,
            image_invalid_reason,
        },
    })
}

/// Serialize the context view under the byte ceiling by shrinking the
/// message until the document fits. The structural minimum (flags, sizes,
/// tool name) wins when the ceiling is smaller than that.
fn bounded_context(
    canonical: &CanonicalResult,
    tool_name: &str,
    max_bytes: usize,
) -> Result<(ContextView, String)> {
    let metadata = SummaryMetadata {
        has_image: canonical.data.has_image(),
        has_data: !canonical.data.is_empty(),
        content_kind: canonical.content_kind(),
        size: canonical.data.to_value().to_string().len(),
    };

    let make_view = |message: String| -> ContextView {
        if canonical.success {
            ContextView::Report(ContextReport {
                success: true,
                tool: tool_name.to_string(),
                message,
                metadata: metadata.clone(),
            })
        } else {
            ContextView::Error(ErrorShape::new(message))
        }
    };

    let mut keep = canonical.message.chars().count();
    loop {
        let view = make_view(truncate(&canonical.message, keep));
        let text = serde_json::to_string(&view)
            .map_err(|err| Error::Processing(format!("context serialization failed: {err}")))?;
        if text.len() <= max_bytes || keep == 0 {
            return Ok((view, text));
        }
        keep /= 2;
    }
}
