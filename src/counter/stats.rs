//! Counter Statistics Module
//!
//! Tracks cache and flush activity. This is also where swallowed store
//! failures become observable.

use chrono::{DateTime, Utc};
use serde::Serialize;

// == Counter Stats ==
/// Counters describing the write-behind cache.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CounterStats {
    /// Lookups answered from the pending cache
    pub hits: u64,
    /// Cold misses that seeded an entry from the store
    pub misses: u64,
    /// Store reads that failed and degraded to a zero count
    pub read_failures: u64,
    /// Batch writes that succeeded
    pub flushes: u64,
    /// Batch writes that failed and left the cache intact
    pub flush_failures: u64,
    /// Entries written by successful flushes
    pub persisted_entries: u64,
    /// Keys currently waiting to be flushed
    pub pending_keys: usize,
    /// Time of the last successful flush
    pub last_flush_at: Option<DateTime<Utc>>,
}

impl CounterStats {
    // == Constructor ==
    /// Creates a new CounterStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_read_failure(&mut self) {
        self.read_failures += 1;
    }

    // == Record Flush ==
    /// Records a successful batch write of `entries` counts.
    pub fn record_flush(&mut self, entries: usize) {
        self.flushes += 1;
        self.persisted_entries += entries as u64;
        self.last_flush_at = Some(Utc::now());
    }

    pub fn record_flush_failure(&mut self) {
        self.flush_failures += 1;
    }

    pub fn set_pending_keys(&mut self, count: usize) {
        self.pending_keys = count;
    }
}
