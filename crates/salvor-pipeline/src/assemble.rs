use serde_json::json;

use salvor_types::{
    CanonicalResult, ComponentKind, DataValue, DisplayComponent, DisplayPayload, RenderHints,
    sort_by_priority,
};

/// Map the display payload into the ordered component list.
///
/// The message component is always present: success at priority 2, error at
/// priority 1. Typed payload shapes contribute their own components. The
/// final sort is stable, so equal priorities keep construction order, a
/// hard contract for consumers ("priority 1 renders before priority 2").
pub fn assemble_components(
    canonical: &CanonicalResult,
    display: &DisplayPayload,
) -> Vec<DisplayComponent> {
    let payload = match display {
        DisplayPayload::Error(shape) => {
            return vec![DisplayComponent::new(
                ComponentKind::Error,
                json!(shape.message),
                1,
            )];
        }
        DisplayPayload::Full(payload) => payload,
    };

    let mut components = Vec::new();

    components.push(DisplayComponent::new(
        ComponentKind::Success,
        json!(canonical.message),
        2,
    ));

    if let Some(image) = canonical.data.image() {
        let mut component = DisplayComponent::new(ComponentKind::Image, json!(image.source), 1)
            .with_metadata(json!({"source_kind": image.kind().as_str()}))
            .with_hints(render_hints(canonical));
        if payload.metadata.image_valid == Some(false) {
            component = component.failed_validation();
        }
        components.push(component);
    }

    if let Some(chart) = canonical.data.chart() {
        let mut component = DisplayComponent::new(ComponentKind::Chart, chart.series.clone(), 1);
        if let Some(chart_type) = &chart.chart_type {
            component = component.with_metadata(json!({"chart_type": chart_type}));
        }
        components.push(component);
    }

    if let Some(table) = canonical.data.table() {
        components.push(
            DisplayComponent::new(ComponentKind::Table, table.rows.clone(), 2).with_metadata(
                json!({"columns": table.columns, "row_count": table.row_count()}),
            ),
        );
    }

    sort_by_priority(&mut components);
    components
}

// Caption, style and sizing ride along as plain payload fields when the tool
// supplies them.
fn render_hints(canonical: &CanonicalResult) -> RenderHints {
    let caption = text_field(canonical, "caption")
        .or_else(|| text_field(canonical, "title"))
        .or_else(|| text_field(canonical, "alt"));
    let style = text_field(canonical, "style");
    let max_width = match canonical.data.get("max_width") {
        Some(DataValue::Other(value)) => value.as_u64().and_then(|n| u32::try_from(n).ok()),
        _ => None,
    };
    RenderHints {
        caption,
        style,
        max_width,
    }
}

fn text_field(canonical: &CanonicalResult, key: &str) -> Option<String> {
    match canonical.data.get(key) {
        Some(DataValue::Text(text)) => Some(text.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use crate::parse::parse_strict;
    use crate::transform::build_views;

    fn components_for(content: &str) -> Vec<DisplayComponent> {
        let canonical = parse_strict(content).unwrap();
        let views = build_views(&canonical, "tool", &PipelineConfig::default()).unwrap();
        assemble_components(&canonical, &views.display)
    }

    #[test]
    fn test_image_renders_before_success_message() {
        let components = components_for(
            r#"{"success":true,"message":"done","data":{"image_url":"data:image/png;base64,abcd"}}"#,
        );
        assert_eq!(components.len(), 2);
        assert_eq!(components[0].kind, ComponentKind::Image);
        assert_eq!(components[1].kind, ComponentKind::Success);
        assert_eq!(components[1].content, serde_json::json!("done"));
    }

    #[test]
    fn test_error_path_has_exactly_one_component() {
        let components = components_for(r#"{"success":false,"message":"boom"}"#);
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].kind, ComponentKind::Error);
        assert_eq!(components[0].priority, 1);
        assert_eq!(components[0].content, serde_json::json!("boom"));
    }

    #[test]
    fn test_full_ordering_with_ties() {
        let components = components_for(
            r#"{"success":true,"message":"all shapes","data":{
                "image_url":"a.png",
                "chart":{"type":"bar","values":[1]},
                "rows":[{"a":1}]
            }}"#,
        );
        let kinds: Vec<_> = components.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ComponentKind::Image,
                ComponentKind::Chart,
                ComponentKind::Success,
                ComponentKind::Table,
            ]
        );
        let priorities: Vec<_> = components.iter().map(|c| c.priority).collect();
        assert_eq!(priorities, vec![1, 1, 2, 2]);
    }

    #[test]
    fn test_invalid_media_degrades_component() {
        let components =
            components_for(r#"{"success":true,"data":{"image_url":"data:x"}}"#);
        let image = components
            .iter()
            .find(|c| c.kind == ComponentKind::Image)
            .unwrap();
        assert!(!image.validation_passed);
    }

    #[test]
    fn test_caption_feeds_render_hints() {
        let components = components_for(
            r#"{"success":true,"data":{"image_url":"a.png","caption":"A plot","style":"wide"}}"#,
        );
        let image = components
            .iter()
            .find(|c| c.kind == ComponentKind::Image)
            .unwrap();
        let hints = image.render_hints.as_ref().unwrap();
        assert_eq!(hints.caption.as_deref(), Some("A plot"));
        assert_eq!(hints.style.as_deref(), Some("wide"));
    }

    #[test]
    fn test_chart_metadata_carries_type() {
        let components = components_for(
            r#"{"success":true,"data":{"chart":{"type":"line","values":[1,2]}}}"#,
        );
        let chart = components
            .iter()
            .find(|c| c.kind == ComponentKind::Chart)
            .unwrap();
        assert_eq!(chart.metadata.as_ref().unwrap()["chart_type"], "line");
    }
}
