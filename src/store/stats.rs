//! Store Statistics Module
//!
//! Tracks in-memory store metrics: hits, misses and rejected writes.

use serde::Serialize;

// == Store Stats ==
/// Counters kept by the in-memory store.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StoreStats {
    /// Number of keys found by fetch operations
    pub hits: u64,
    /// Number of keys not found (absent or expired) by fetch operations
    pub misses: u64,
    /// Number of writes refused because the store was full
    pub rejected: u64,
    /// Current number of entries in the store
    pub total_entries: usize,
}

impl StoreStats {
    /// Creates a new StoreStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns hits / (hits + misses), or 0.0 if nothing has been fetched.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hits(&mut self, count: u64) {
        self.hits += count;
    }

    pub fn record_misses(&mut self, count: u64) {
        self.misses += count;
    }

    pub fn record_rejection(&mut self) {
        self.rejected += 1;
    }
}
