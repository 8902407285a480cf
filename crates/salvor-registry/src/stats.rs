use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Rolling aggregate over every result the store has accepted.
///
/// Counters cover the store's whole lifetime; `cleanup` evicts entries but
/// never rewinds these. Handed out as a snapshot by [`ResultStore::stats`].
///
/// [`ResultStore::stats`]: crate::ResultStore::stats
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessingStatistics {
    /// Total number of results ever inserted.
    pub total_processed: u64,
    /// Results that parsed cleanly (or recovered) and reported success.
    pub success_count: u64,
    /// Results carrying an error report or a failing canonical outcome.
    pub error_count: u64,
    /// Mean end-to-end pipeline duration across all inserts.
    pub average_duration_ms: f64,
    /// Instant of the most recent insert, if any.
    pub last_processed_at: Option<DateTime<Utc>>,
}
