use serde_json::json;

use salvor_types::{FieldKind, RawToolResult, ValidationOutcome};

/// Run every validation rule against the envelope.
///
/// Rules never short-circuit: the returned ledger always holds one outcome
/// per rule, so a caller sees every violation at once. The first and third
/// rules are guaranteed by the type of `RawToolResult`, but they still get a
/// ledger entry: lenient ingestion can hand us sentinel values, and the
/// rules that catch those are only meaningful against a complete ledger.
pub fn validate_envelope(raw: &RawToolResult) -> Vec<ValidationOutcome> {
    vec![
        check_envelope(),
        check_tool_name(raw),
        check_content_shape(),
        check_content_filled(raw),
    ]
}

/// True when every outcome in the ledger passed.
pub fn is_valid(outcomes: &[ValidationOutcome]) -> bool {
    outcomes.iter().all(|outcome| outcome.valid)
}

// Rule 1: the envelope exists. A typed envelope always does.
fn check_envelope() -> ValidationOutcome {
    ValidationOutcome::pass("envelope", FieldKind::Object)
}

// Rule 2: the tool name is a non-empty string.
fn check_tool_name(raw: &RawToolResult) -> ValidationOutcome {
    if raw.tool_name.trim().is_empty() {
        ValidationOutcome::fail(
            "tool_name",
            "tool name must be a non-empty string",
            FieldKind::Text,
            FieldKind::of(&json!(raw.tool_name)),
        )
        .with_value(json!(raw.tool_name))
    } else {
        ValidationOutcome::pass("tool_name", FieldKind::Text)
    }
}

// Rule 3: content is textual. Guaranteed by the field type.
fn check_content_shape() -> ValidationOutcome {
    ValidationOutcome::pass("content", FieldKind::Text)
}

// Rule 4: content is non-empty after trimming.
fn check_content_filled(raw: &RawToolResult) -> ValidationOutcome {
    if raw.content.trim().is_empty() {
        ValidationOutcome::fail(
            "content",
            "content must be non-empty after trimming",
            FieldKind::Text,
            FieldKind::of(&json!(raw.content)),
        )
        .with_value(json!(raw.content))
    } else {
        ValidationOutcome::pass("content", FieldKind::Text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_envelope_passes_all_rules() {
        let raw = RawToolResult::new("render_image", "{}");
        let ledger = validate_envelope(&raw);
        assert_eq!(ledger.len(), 4);
        assert!(is_valid(&ledger));
    }

    #[test]
    fn test_empty_tool_name_fails_one_rule() {
        let raw = RawToolResult::new("", "{}");
        let ledger = validate_envelope(&raw);
        assert_eq!(ledger.len(), 4);
        assert!(!is_valid(&ledger));

        let failed: Vec<_> = ledger.iter().filter(|o| !o.valid).collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].field, "tool_name");
    }

    #[test]
    fn test_whitespace_content_fails() {
        let raw = RawToolResult::new("calc", "   \n  ");
        let ledger = validate_envelope(&raw);
        let failed: Vec<_> = ledger.iter().filter(|o| !o.valid).collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].field, "content");
        assert_eq!(failed[0].actual, FieldKind::EmptyText);
    }

    #[test]
    fn test_ledger_is_complete_with_multiple_violations() {
        let raw = RawToolResult::new("", "");
        let ledger = validate_envelope(&raw);
        assert_eq!(ledger.len(), 4);
        assert_eq!(ledger.iter().filter(|o| !o.valid).count(), 2);
    }
}
