//! Custom assertions for salvor-specific validation.
//!
//! Provides high-level assertions that make tests more readable:
//! - Component ordering checks
//! - Stage machine path validation
//! - Context summary budget checks

use anyhow::Result;
use salvor_types::{DebugRecord, DisplayComponent};

/// Assert that components are in non-decreasing priority order.
pub fn assert_components_sorted(components: &[DisplayComponent]) -> Result<()> {
    let priorities: Vec<u8> = components.iter().map(|c| c.priority).collect();
    if !priorities.is_sorted() {
        anyhow::bail!("components out of priority order: {:?}", priorities);
    }
    Ok(())
}

/// Assert that a debug record was sealed after a legal stage walk.
pub fn assert_sealed_path(record: &DebugRecord) -> Result<()> {
    if !record.is_sealed() {
        anyhow::bail!("debug record was never sealed");
    }
    if !record.is_valid_path() {
        anyhow::bail!("illegal stage sequence: {:?}", record.stage_sequence());
    }
    Ok(())
}

/// Assert that a serialized context summary fits its byte budget.
pub fn assert_within_budget(summary: &str, max_bytes: usize) -> Result<()> {
    if summary.len() > max_bytes {
        anyhow::bail!(
            "context summary is {} bytes, budget is {}",
            summary.len(),
            max_bytes
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use salvor_types::{ComponentKind, Stage};
    use serde_json::json;

    #[test]
    fn test_components_sorted() {
        let sorted = vec![
            DisplayComponent::new(ComponentKind::Image, json!({}), 1),
            DisplayComponent::new(ComponentKind::Success, json!("ok"), 2),
        ];
        assert!(assert_components_sorted(&sorted).is_ok());

        let unsorted = vec![
            DisplayComponent::new(ComponentKind::Success, json!("ok"), 2),
            DisplayComponent::new(ComponentKind::Image, json!({}), 1),
        ];
        assert!(assert_components_sorted(&unsorted).is_err());
    }

    #[test]
    fn test_sealed_path() {
        let mut record = DebugRecord::new(Utc::now());
        assert!(assert_sealed_path(&record).is_err());

        record.enter_stage(Stage::Error, Utc::now());
        record.seal(Utc::now());
        assert!(assert_sealed_path(&record).is_ok());
    }

    #[test]
    fn test_within_budget() {
        assert!(assert_within_budget("short", 100).is_ok());
        assert!(assert_within_budget("much too long", 5).is_err());
    }
}
