// In-memory registry for completed pipeline runs
// Holds the only shared mutable state; everything upstream is re-entrant

mod stats;
mod store;

// Public API
pub use stats::ProcessingStatistics;
pub use store::ResultStore;
