//! End-to-end `salvor process` runs over envelope files spanning the whole
//! recovery spectrum.

use assert_cmd::Command;
use predicates::prelude::*;
use salvor_testing::{TestWorld, assertions, fixtures};

#[test]
fn test_process_reports_every_envelope() {
    let world = TestWorld::new();
    let input = world
        .write_envelopes("batch.jsonl", &fixtures::spectrum())
        .unwrap();

    let result = world.run(&["process", input.to_str().unwrap()]).unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());

    let stdout = result.stdout();
    assert!(stdout.contains("Processing 8 envelopes"));
    assert!(stdout.contains("✓ ok"));
    assert!(stdout.contains("↻ recovered"));
    assert!(stdout.contains("✗ tool failed"));
    assert!(stdout.contains("✗ validation"));
    assert!(stdout.contains("clean_success"));
    assert!(stdout.contains("truncated_image"));
}

#[test]
fn test_process_json_document() {
    let world = TestWorld::new();
    let input = world
        .write_envelopes("batch.jsonl", &fixtures::spectrum())
        .unwrap();

    let result = world
        .run(&["process", input.to_str().unwrap(), "--json"])
        .unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());

    let doc = result.json().unwrap();
    let results = doc["results"].as_array().unwrap();
    assert_eq!(results.len(), 8);

    assert_eq!(doc["stats"]["total_processed"], 8);
    assert_eq!(doc["stats"]["success_count"], 5);
    assert_eq!(doc["stats"]["error_count"], 3);

    // the recovered image envelope names its successful strategy
    let truncated = &results[3];
    assert_eq!(truncated["tool_name"], "truncated_image");
    let attempts = truncated["recovery_attempts"].as_array().unwrap();
    assert_eq!(attempts[0]["strategy"], "field_extraction");
    assert_eq!(attempts[0]["successful"], true);

    // the empty envelope carries a typed, non-retryable error
    let failed = &results[7];
    assert_eq!(failed["error"]["kind"], "validation");
    assert_eq!(failed["error"]["retryable"], false);

    for entry in results {
        let summary = entry["context_summary"].as_str().unwrap();
        assertions::assert_within_budget(summary, 2048).unwrap();

        let components = entry["components"].as_array().unwrap();
        assert!(!components.is_empty());
        let priorities: Vec<i64> = components
            .iter()
            .map(|component| component["priority"].as_i64().unwrap())
            .collect();
        assert!(priorities.is_sorted());
    }
}

#[test]
fn test_process_respects_config_budget() {
    let world = TestWorld::new();
    let config = world
        .write_file("salvor.toml", "summary_max_bytes = 256\n")
        .unwrap();
    let input = world
        .write_envelopes("batch.jsonl", &fixtures::spectrum())
        .unwrap();

    let result = world
        .run(&[
            "--config",
            config.to_str().unwrap(),
            "process",
            input.to_str().unwrap(),
            "--json",
        ])
        .unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());

    let doc = result.json().unwrap();
    for entry in doc["results"].as_array().unwrap() {
        let summary = entry["context_summary"].as_str().unwrap();
        assert!(summary.len() <= 256, "summary too large: {}", summary.len());
    }
}

#[test]
fn test_process_prints_stats_on_request() {
    let world = TestWorld::new();
    let input = world
        .write_envelopes(
            "two.jsonl",
            &[
                ("good_tool", fixtures::clean_success()),
                ("bad_tool", fixtures::garbage()),
            ],
        )
        .unwrap();

    let result = world
        .run(&["process", input.to_str().unwrap(), "--stats"])
        .unwrap();
    assert!(result.success());

    let stdout = result.stdout();
    assert!(stdout.contains("Registry statistics:"));
    assert!(stdout.contains("Total processed:  2"));
    assert!(stdout.contains("Succeeded:        1"));
    assert!(stdout.contains("Failed:           1"));
}

#[test]
fn test_process_missing_file_fails() {
    Command::cargo_bin("salvor")
        .unwrap()
        .args(["process", "/nonexistent/input.jsonl"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read input file"));
}
