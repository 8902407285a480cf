use std::sync::Arc;

use salvor_pipeline::telemetry::summarize;
use salvor_pipeline::{PipelineConfig, ResultPipeline};
use salvor_testing::{assertions, fixtures};
use salvor_types::{ContextView, RawToolResult, Stage};

#[test]
fn test_context_summary_parses_back_into_the_typed_view() {
    let pipeline = ResultPipeline::default();
    let raw = RawToolResult::new(
        "render_image",
        r#"{"success":true,"message":"done","data":{"image_url":"data:image/png;base64,abcd"}}"#,
    );
    let result = pipeline.process(&raw);

    let view: ContextView =
        serde_json::from_str(&result.context_summary).expect("summary should be valid JSON");
    match view {
        ContextView::Report(report) => {
            assert!(report.success);
            assert_eq!(report.tool, "render_image");
            assert!(report.metadata.has_image);
            // Presence flags only; the media bytes never reach the summary.
            assert!(!result.context_summary.contains("base64,abcd"));
        }
        ContextView::Error(_) => panic!("expected the success shape"),
    }
}

#[test]
fn test_recovered_run_summary_reports_recovery() {
    let pipeline = ResultPipeline::default();
    let raw = RawToolResult::new("t", r#"{"success":true, "data":{"image_url":"abc""#);
    let result = pipeline.process(&raw);

    let summary = summarize(&result.debug, &result.recovery_attempts);
    assert!(summary.recovery_invoked);
    assert!(summary.recovery_successful);
    assert_eq!(summary.error_count, 0);
    assert!(summary.warning_count >= 1, "strict-parse failure should warn");
    assert_eq!(
        result.debug.stage_sequence(),
        vec![
            Stage::Received,
            Stage::Validating,
            Stage::Parsing,
            Stage::Processing,
            Stage::DisplayPrep,
            Stage::Completion,
        ]
    );
}

#[test]
fn test_fallback_summary_stays_within_budget() {
    let config = PipelineConfig::default();
    let budget = config.summary_max_bytes;
    let pipeline = ResultPipeline::new(config);

    let huge = "#not json ".repeat(4000);
    let result = pipeline.process(&RawToolResult::new("noisy", &huge));

    assert!(result.error.is_none());
    assert!(!result.canonical.success);
    // Canonical keeps the content verbatim; the bounded view does not.
    assert_eq!(result.canonical.message, huge);
    assert!(result.context_summary.len() <= budget);
    assert!(result.context_summary.contains("...(truncated)"));
}

#[test]
fn test_hostile_inputs_always_produce_sealed_results() {
    let pipeline = ResultPipeline::default();
    let inputs = [
        "{",
        "}",
        "null",
        "true",
        "[[[[[[",
        "\u{0000}\u{0001}\u{0002}",
        "日本語テキストだけ",
        r#"{"success":true,"data":{"rows":"#,
        r#"{"a":{"b":{"c":{"d":{"e":1"#,
        "\"unterminated",
    ];

    for content in inputs {
        let result = pipeline.process(&RawToolResult::new("hostile", content));
        assertions::assert_sealed_path(&result.debug)
            .unwrap_or_else(|e| panic!("{e} for {content:?}"));
        assertions::assert_components_sorted(&result.components).unwrap();
        assert!(
            !result.components.is_empty(),
            "no components for {content:?}"
        );
    }
}

#[test]
fn test_spectrum_recovers_by_the_documented_strategy() {
    let pipeline = ResultPipeline::default();
    let recovered_by = |content: &str| -> Option<String> {
        let result = pipeline.process(&RawToolResult::new("probe", content));
        result
            .recovery_attempts
            .iter()
            .find(|attempt| attempt.successful)
            .map(|attempt| attempt.strategy.clone())
    };

    assert_eq!(recovered_by(fixtures::clean_success()), None);
    assert_eq!(recovered_by(fixtures::image_success()), None);
    assert_eq!(recovered_by(fixtures::failed_tool()), None);
    assert_eq!(
        recovered_by(fixtures::truncated_image()).as_deref(),
        Some("field_extraction")
    );
    assert_eq!(
        recovered_by(fixtures::truncated_text()).as_deref(),
        Some("structural_cleanup")
    );
    assert_eq!(
        recovered_by(fixtures::broken_tail()).as_deref(),
        Some("partial_salvage")
    );
    assert_eq!(
        recovered_by(fixtures::garbage()).as_deref(),
        Some("fallback_synthesis")
    );
    assert_eq!(recovered_by(fixtures::empty()), None);
}

#[test]
fn test_pipeline_is_shareable_across_threads() {
    let pipeline = Arc::new(ResultPipeline::default());
    let mut handles = Vec::new();

    for i in 0..8 {
        let pipeline = Arc::clone(&pipeline);
        handles.push(std::thread::spawn(move || {
            let raw = RawToolResult::new(
                format!("tool_{i}"),
                r#"{"success":true,"message":"ok"}"#,
            );
            pipeline.process(&raw)
        }));
    }

    let mut ids = std::collections::HashSet::new();
    for handle in handles {
        let result = handle.join().expect("thread should not panic");
        assert!(result.succeeded());
        ids.insert(result.id);
    }
    assert_eq!(ids.len(), 8);
}
