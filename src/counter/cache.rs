//! Counter Cache Module
//!
//! Read-through, write-behind layer between hit requests and the durable
//! store. Store reads happen on a cold miss only.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::counter::{CounterEntry, CounterStats, PendingCache};
use crate::store::CounterStore;

// == Counter Cache ==
/// Pending counts in front of a [`CounterStore`].
///
/// The pending lock is never held across a store call. Mutations happen on
/// either side of the await, which is what allows the documented races
/// (duplicate seeding, increments lost from the pending map on flush).
#[derive(Clone)]
pub struct CounterCache {
    pending: Arc<RwLock<PendingCache>>,
    store: Arc<dyn CounterStore>,
}

impl CounterCache {
    // == Constructor ==
    pub fn new(store: Arc<dyn CounterStore>) -> Self {
        Self {
            pending: Arc::new(RwLock::new(PendingCache::new())),
            store,
        }
    }

    // == Get ==
    /// Returns the pending count for `name`.
    ///
    /// A warm name is returned as is. A cold name is seeded from the store and
    /// that seeding counts as the current hit, so this is not a pure read.
    pub async fn get(&self, name: &str) -> CounterEntry {
        if let Some(count) = self.pending.write().await.peek(name) {
            return CounterEntry::new(name, count);
        }
        self.seed_from_store(name).await
    }

    // == Increment ==
    /// Records one hit for `name` and returns the new count.
    pub async fn increment(&self, name: &str) -> CounterEntry {
        if let Some(count) = self.pending.write().await.bump(name) {
            return CounterEntry::new(name, count);
        }
        self.seed_from_store(name).await
    }

    // == Seed From Store ==
    /// Cold-miss path. A failed read degrades to a zero count and leaves the
    /// pending map untouched.
    async fn seed_from_store(&self, name: &str) -> CounterEntry {
        match self.store.get_count(name).await {
            Ok(persisted) => {
                let persisted = persisted.map(|e| e.count).unwrap_or(0);
                let count = self.pending.write().await.seed(name, persisted);
                debug!("Seeded counter {} from store at {}", name, count);
                CounterEntry::new(name, count)
            }
            Err(e) => {
                // TODO: product review on zero-count-on-read-failure vs propagating the error
                warn!("Store read failed for counter {}: {}", name, e);
                self.pending.write().await.record_read_failure();
                CounterEntry::zero(name)
            }
        }
    }

    // == Flush Support ==
    /// Copies every pending entry into a batch.
    pub async fn snapshot(&self) -> Vec<CounterEntry> {
        self.pending.read().await.snapshot()
    }

    /// Drops the whole pending map after a successful write of `written`
    /// entries. Returns how many pending entries were dropped.
    pub async fn clear_after_flush(&self, written: usize) -> usize {
        let mut pending = self.pending.write().await;
        pending.record_flush(written);
        pending.clear()
    }

    pub async fn record_flush_failure(&self) {
        self.pending.write().await.record_flush_failure();
    }

    pub async fn stats(&self) -> CounterStats {
        self.pending.read().await.stats()
    }

    pub async fn pending_len(&self) -> usize {
        self.pending.read().await.len()
    }

    pub async fn is_pending(&self, name: &str) -> bool {
        self.pending.read().await.contains(name)
    }

    pub fn store(&self) -> &Arc<dyn CounterStore> {
        &self.store
    }
}
