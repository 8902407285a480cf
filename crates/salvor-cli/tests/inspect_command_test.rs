//! `salvor inspect` surfaces the full processing trail for one envelope.

use salvor_testing::{TestWorld, fixtures};

#[test]
fn test_inspect_defaults_to_first_line() {
    let world = TestWorld::new();
    let input = world
        .write_envelopes("one.jsonl", &[("render_image", fixtures::image_success())])
        .unwrap();

    let result = world.run(&["inspect", input.to_str().unwrap()]).unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());

    let stdout = result.stdout();
    assert!(stdout.contains("Tool:    render_image"));
    assert!(stdout.contains("Validation"));
    assert!(stdout.contains("tool_name"));
    assert!(stdout.contains("Stages"));
    assert!(stdout.contains("completion"));
    assert!(stdout.contains("Validations: 4 passed, 0 failed"));
    assert!(stdout.contains("Recovery:    not invoked"));
    assert!(stdout.contains("Status:   ✓ ok"));
}

#[test]
fn test_inspect_shows_recovery_trail() {
    let world = TestWorld::new();
    let input = world
        .write_envelopes(
            "mixed.jsonl",
            &[
                ("ok_tool", fixtures::clean_success()),
                ("bad_tool", fixtures::garbage()),
            ],
        )
        .unwrap();

    let result = world
        .run(&["inspect", input.to_str().unwrap(), "--line", "2"])
        .unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());

    let stdout = result.stdout();
    assert!(stdout.contains("Recovery"));
    assert!(stdout.contains("field_extraction"));
    assert!(stdout.contains("minimal_extraction"));
    assert!(stdout.contains("structural_cleanup"));
    assert!(stdout.contains("partial_salvage"));
    assert!(stdout.contains("fallback_synthesis"));
    assert!(stdout.contains("Recovery:    successful"));
    assert!(stdout.contains("Status:   ✗ tool failed"));
}

#[test]
fn test_inspect_surfaces_validation_failure() {
    let world = TestWorld::new();
    let input = world
        .write_envelopes("empty.jsonl", &[("empty_tool", fixtures::empty())])
        .unwrap();

    let result = world.run(&["inspect", input.to_str().unwrap()]).unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());

    let stdout = result.stdout();
    assert!(stdout.contains("content must be non-empty after trimming"));
    assert!(stdout.contains("Kind:      validation"));
    assert!(stdout.contains("Retryable: false"));
}

#[test]
fn test_inspect_line_out_of_range() {
    let world = TestWorld::new();
    let input = world
        .write_envelopes("one.jsonl", &[("a", fixtures::clean_success())])
        .unwrap();

    let result = world
        .run(&["inspect", input.to_str().unwrap(), "--line", "5"])
        .unwrap();
    assert!(!result.success());
    assert!(result.stderr().contains("out of range"));
}
