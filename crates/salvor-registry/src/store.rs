use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use salvor_types::{ProcessedResult, ResultId};

use crate::stats::ProcessingStatistics;

/// One registry slot: the result plus the instant it was filed.
#[derive(Debug, Clone)]
struct StoredEntry {
    result: ProcessedResult,
    inserted_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct StoreInner {
    entries: HashMap<ResultId, StoredEntry>,
    total_processed: u64,
    success_count: u64,
    error_count: u64,
    total_duration_ms: i64,
    last_processed_at: Option<DateTime<Utc>>,
}

/// In-memory registry of completed pipeline runs.
///
/// One lock covers the map and the counters, so concurrent inserts never
/// interleave a partial write and a sweep never removes an entry mid-insert.
#[derive(Debug, Default)]
pub struct ResultStore {
    inner: Mutex<StoreInner>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// File a completed result under its id and fold it into the counters.
    /// Returns the id the result is stored under.
    pub fn insert(&self, result: ProcessedResult) -> ResultId {
        let mut inner = self.inner.lock().unwrap();
        let id = result.id.clone();

        inner.total_processed += 1;
        if result.succeeded() {
            inner.success_count += 1;
        } else {
            inner.error_count += 1;
        }
        inner.total_duration_ms += result.debug.duration_ms;

        let now = Utc::now();
        inner.last_processed_at = Some(now);
        inner.entries.insert(
            id.clone(),
            StoredEntry {
                result,
                inserted_at: now,
            },
        );
        id
    }

    pub fn get(&self, id: &ResultId) -> Option<ProcessedResult> {
        let inner = self.inner.lock().unwrap();
        inner.entries.get(id).map(|entry| entry.result.clone())
    }

    pub fn contains(&self, id: &ResultId) -> bool {
        self.inner.lock().unwrap().entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry stored more than `max_age_ms` ago. Returns the number
    /// of entries removed.
    pub fn cleanup(&self, max_age_ms: i64) -> usize {
        self.cleanup_before(Utc::now() - Duration::milliseconds(max_age_ms))
    }

    /// Drop every entry inserted strictly before `cutoff`. Idempotent:
    /// repeating the same cutoff removes nothing further. Lifetime counters
    /// are left untouched.
    pub fn cleanup_before(&self, cutoff: DateTime<Utc>) -> usize {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.entries.len();
        inner.entries.retain(|_, entry| entry.inserted_at >= cutoff);
        before - inner.entries.len()
    }

    /// Snapshot the rolling statistics.
    pub fn stats(&self) -> ProcessingStatistics {
        let inner = self.inner.lock().unwrap();
        let average_duration_ms = if inner.total_processed == 0 {
            0.0
        } else {
            inner.total_duration_ms as f64 / inner.total_processed as f64
        };
        ProcessingStatistics {
            total_processed: inner.total_processed,
            success_count: inner.success_count,
            error_count: inner.error_count,
            average_duration_ms,
            last_processed_at: inner.last_processed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salvor_pipeline::ResultPipeline;
    use salvor_types::RawToolResult;

    fn processed(content: &str) -> ProcessedResult {
        ResultPipeline::default().process(&RawToolResult::new("demo_tool", content))
    }

    #[test]
    fn test_insert_returns_the_result_id() {
        let store = ResultStore::new();
        let result = processed(r#"{"success":true,"message":"ok"}"#);
        let id = result.id.clone();

        assert_eq!(store.insert(result), id);
        assert!(store.contains(&id));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_get_clones_the_stored_result() {
        let store = ResultStore::new();
        let id = store.insert(processed(r#"{"success":true,"message":"ok"}"#));

        let fetched = store.get(&id).unwrap();
        assert_eq!(fetched.id, id);
        assert!(fetched.succeeded());
        assert!(store.get(&ResultId::generate()).is_none());
    }

    #[test]
    fn test_counters_split_success_from_error() {
        let store = ResultStore::new();
        store.insert(processed(r#"{"success":true,"message":"ok"}"#));
        store.insert(processed(r#"{"success":false,"message":"tool refused"}"#));
        // empty content fails validation outright
        store.insert(processed(""));

        let stats = store.stats();
        assert_eq!(stats.total_processed, 3);
        assert_eq!(stats.success_count, 1);
        assert_eq!(stats.error_count, 2);
        assert!(stats.last_processed_at.is_some());
    }

    #[test]
    fn test_average_duration_over_inserts() {
        let store = ResultStore::new();
        let mut fast = processed(r#"{"success":true,"message":"ok"}"#);
        fast.debug.duration_ms = 10;
        let mut slow = processed(r#"{"success":true,"message":"ok"}"#);
        slow.debug.duration_ms = 40;

        store.insert(fast);
        store.insert(slow);
        assert_eq!(store.stats().average_duration_ms, 25.0);
    }

    #[test]
    fn test_empty_store_stats_are_zeroed() {
        let stats = ResultStore::new().stats();
        assert_eq!(stats.total_processed, 0);
        assert_eq!(stats.success_count, 0);
        assert_eq!(stats.error_count, 0);
        assert_eq!(stats.average_duration_ms, 0.0);
        assert!(stats.last_processed_at.is_none());
    }

    #[test]
    fn test_cleanup_before_removes_exactly_the_stale_entries() {
        let store = ResultStore::new();
        let early = store.insert(processed(r#"{"success":true,"message":"ok"}"#));
        std::thread::sleep(std::time::Duration::from_millis(5));
        let cutoff = Utc::now();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let late = store.insert(processed(r#"{"success":true,"message":"ok"}"#));

        assert_eq!(store.cleanup_before(cutoff), 1);
        assert!(!store.contains(&early));
        assert!(store.contains(&late));

        // repeating the same cutoff is a no-op
        assert_eq!(store.cleanup_before(cutoff), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_cleanup_keeps_lifetime_counters() {
        let store = ResultStore::new();
        store.insert(processed(r#"{"success":true,"message":"ok"}"#));
        std::thread::sleep(std::time::Duration::from_millis(10));

        assert_eq!(store.cleanup(1), 1);
        assert!(store.is_empty());
        assert_eq!(store.stats().total_processed, 1);
        assert_eq!(store.stats().success_count, 1);
    }

    #[test]
    fn test_cleanup_with_wide_window_removes_nothing() {
        let store = ResultStore::new();
        let id = store.insert(processed(r#"{"success":true,"message":"ok"}"#));

        assert_eq!(store.cleanup(60_000), 0);
        assert!(store.contains(&id));
    }
}
