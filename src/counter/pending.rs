//! Pending Cache Module
//!
//! The in-memory map of counts that have not been persisted yet.

use std::collections::HashMap;

use crate::counter::{CounterEntry, CounterStats};

// == Pending Cache ==
/// Map from counter name to its not-yet-persisted count.
///
/// A name is present only between its first unflushed increment and the next
/// successful flush. Entries are only ever removed all together by
/// [`PendingCache::clear`].
#[derive(Debug, Default)]
pub struct PendingCache {
    /// Pending counts by name
    entries: HashMap<String, u64>,
    /// Activity counters
    stats: CounterStats,
}

impl PendingCache {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Peek ==
    /// Returns the pending count for `name` without changing it.
    pub fn peek(&mut self, name: &str) -> Option<u64> {
        let count = self.entries.get(name).copied()?;
        self.stats.record_hit();
        Some(count)
    }

    // == Bump ==
    /// Adds one hit to a pending name and returns the new count.
    ///
    /// Returns `None` on a cold miss; the caller must seed from the store.
    pub fn bump(&mut self, name: &str) -> Option<u64> {
        let count = self.entries.get_mut(name)?;
        *count = count.saturating_add(1);
        let count = *count;
        self.stats.record_hit();
        Some(count)
    }

    // == Seed ==
    /// Seeds `name` from its persisted count, recording the current hit.
    ///
    /// Overwrites any entry created while the store read was in flight, so two
    /// racing cold misses on one name can undercount by one.
    pub fn seed(&mut self, name: &str, persisted: u64) -> u64 {
        let count = persisted.saturating_add(1);
        self.entries.insert(name.to_string(), count);
        self.stats.record_miss();
        self.stats.set_pending_keys(self.entries.len());
        count
    }

    // == Snapshot ==
    /// Copies every pending entry into a batch, ordered by name.
    pub fn snapshot(&self) -> Vec<CounterEntry> {
        let mut batch: Vec<CounterEntry> = self
            .entries
            .iter()
            .map(|(name, &count)| CounterEntry::new(name.clone(), count))
            .collect();
        batch.sort_by(|a, b| a.name.cmp(&b.name));
        batch
    }

    // == Clear ==
    /// Drops every pending entry. Returns how many were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.entries.len();
        self.entries.clear();
        self.stats.set_pending_keys(0);
        dropped
    }

    pub fn record_read_failure(&mut self) {
        self.stats.record_read_failure();
    }

    pub fn record_flush(&mut self, entries: usize) {
        self.stats.record_flush(entries);
    }

    pub fn record_flush_failure(&mut self) {
        self.stats.record_flush_failure();
    }

    // == Stats ==
    /// Returns current statistics.
    pub fn stats(&self) -> CounterStats {
        let mut stats = self.stats.clone();
        stats.set_pending_keys(self.entries.len());
        stats
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
