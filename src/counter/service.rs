//! Hit Counter Module
//!
//! The increment service: records a hit, answers with the count right away
//! and leaves persistence to a gated background flush.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::counter::{CounterCache, CounterEntry, CounterStats, FlushGate};
use crate::store::CounterStore;

// == Flush Outcome ==
/// Result of one flush attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushOutcome {
    /// The gate was closed; nothing was attempted
    GateClosed,
    /// The gate was claimed but nothing was pending
    Empty,
    /// A batch of this many entries was persisted and the cache cleared
    Flushed(usize),
    /// The batch write failed; pending entries were kept
    Failed,
}

// == Hit Counter ==
/// Write-behind hit counter.
///
/// One instance owns the pending cache and the flush gate. Share it as
/// `Arc<HitCounter>`.
pub struct HitCounter {
    cache: CounterCache,
    gate: Arc<FlushGate>,
}

impl HitCounter {
    // == Constructor ==
    /// Creates a counter over `store` with a fresh, closed gate.
    pub fn new(store: Arc<dyn CounterStore>) -> Self {
        Self::with_gate(store, Arc::new(FlushGate::new()))
    }

    /// Creates a counter sharing an existing gate.
    pub fn with_gate(store: Arc<dyn CounterStore>, gate: Arc<FlushGate>) -> Self {
        Self {
            cache: CounterCache::new(store),
            gate,
        }
    }

    // == Record Hit ==
    /// Counts one hit for `name` and returns the resulting count.
    ///
    /// Never fails: a store read error yields a zero count. A flush attempt is
    /// spawned afterwards and not awaited.
    pub async fn record_hit(self: &Arc<Self>, name: &str) -> CounterEntry {
        let entry = self.cache.increment(name).await;
        drop(self.spawn_flush());
        entry
    }

    /// Counts one hit without triggering a flush.
    pub async fn increment(&self, name: &str) -> CounterEntry {
        self.cache.increment(name).await
    }

    /// Returns the current count for `name`, seeding it on a cold miss.
    pub async fn get(&self, name: &str) -> CounterEntry {
        self.cache.get(name).await
    }

    // == Spawn Flush ==
    /// Spawns [`HitCounter::try_flush`] onto the runtime.
    pub fn spawn_flush(self: &Arc<Self>) -> JoinHandle<FlushOutcome> {
        let counter = Arc::clone(self);
        tokio::spawn(async move { counter.try_flush().await })
    }

    // == Try Flush ==
    /// Flushes the pending cache if the gate is open.
    ///
    /// The gate is closed before any I/O, so overlapping calls in the same
    /// window perform at most one batch write. After a failure the gate stays
    /// closed until the next timer tick.
    pub async fn try_flush(&self) -> FlushOutcome {
        if !self.gate.try_close() {
            return FlushOutcome::GateClosed;
        }
        self.flush_pending().await
    }

    // == Drain ==
    /// Flushes regardless of the gate. Used once at shutdown.
    pub async fn drain(&self) -> FlushOutcome {
        let outcome = self.flush_pending().await;
        info!("Drained pending counts on shutdown: {:?}", outcome);
        outcome
    }

    async fn flush_pending(&self) -> FlushOutcome {
        let batch = self.cache.snapshot().await;
        if batch.is_empty() {
            debug!("Flush window claimed with nothing pending");
            return FlushOutcome::Empty;
        }

        match self.cache.store().set_count_batch(&batch).await {
            Ok(()) => {
                // Clears names bumped after the snapshot too; their hits
                // were already returned to callers but are not persisted.
                let dropped = self.cache.clear_after_flush(batch.len()).await;
                info!(
                    "Flushed {} counters to store ({} pending dropped)",
                    batch.len(),
                    dropped
                );
                FlushOutcome::Flushed(batch.len())
            }
            Err(e) => {
                error!(
                    "Flush of {} counters failed, keeping them pending: {}",
                    batch.len(),
                    e
                );
                self.cache.record_flush_failure().await;
                FlushOutcome::Failed
            }
        }
    }

    pub fn gate(&self) -> &Arc<FlushGate> {
        &self.gate
    }

    pub async fn stats(&self) -> CounterStats {
        self.cache.stats().await
    }

    pub async fn pending_len(&self) -> usize {
        self.cache.pending_len().await
    }

    pub async fn is_pending(&self, name: &str) -> bool {
        self.cache.is_pending(name).await
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter::test_support::{HeldStore, RecordingStore};

    fn counter_over(store: &Arc<RecordingStore>) -> Arc<HitCounter> {
        Arc::new(HitCounter::new(store.clone()))
    }

    #[tokio::test]
    async fn test_consecutive_hits_differ_by_one() {
        let store = Arc::new(RecordingStore::with_counts(&[("home", 100)]));
        let counter = counter_over(&store);

        let first = counter.record_hit("home").await;
        let second = counter.record_hit("home").await;

        assert_eq!(first.count, 101);
        assert_eq!(second.count, first.count + 1);
    }

    #[tokio::test]
    async fn test_flush_with_closed_gate_is_noop() {
        let store = Arc::new(RecordingStore::new());
        let counter = counter_over(&store);

        counter.increment("home").await;

        assert_eq!(counter.try_flush().await, FlushOutcome::GateClosed);
        assert_eq!(store.batch_calls(), 0);
        assert_eq!(counter.pending_len().await, 1);
    }

    #[tokio::test]
    async fn test_open_gate_flushes_and_clears() {
        let store = Arc::new(RecordingStore::new());
        let counter = counter_over(&store);

        counter.increment("a").await;
        counter.increment("a").await;
        counter.increment("b").await;
        counter.gate().open();

        assert_eq!(counter.try_flush().await, FlushOutcome::Flushed(2));
        assert_eq!(counter.pending_len().await, 0);
        assert_eq!(store.persisted("a").await, Some(2));
        assert_eq!(store.persisted("b").await, Some(1));
        assert!(!counter.gate().is_open());
    }

    #[tokio::test]
    async fn test_empty_flush_still_closes_gate() {
        let store = Arc::new(RecordingStore::new());
        let counter = counter_over(&store);
        counter.gate().open();

        assert_eq!(counter.try_flush().await, FlushOutcome::Empty);
        assert!(!counter.gate().is_open());
        assert_eq!(store.batch_calls(), 0);
    }

    #[tokio::test]
    async fn test_reseed_after_flush_reads_store() {
        let store = Arc::new(RecordingStore::new());
        let counter = counter_over(&store);

        for _ in 0..5 {
            counter.increment("home").await;
        }
        counter.gate().open();
        counter.try_flush().await;

        let entry = counter.get("home").await;
        assert_eq!(entry.count, 6);
        assert_eq!(store.reads(), 2);
    }

    #[tokio::test]
    async fn test_failed_flush_keeps_pending_and_retries_same_batch() {
        let store = Arc::new(RecordingStore::new());
        let counter = counter_over(&store);

        counter.increment("a").await;
        counter.increment("b").await;
        store.set_fail_writes(true);
        counter.gate().open();

        assert_eq!(counter.try_flush().await, FlushOutcome::Failed);
        assert_eq!(counter.pending_len().await, 2);
        let failed_batch = store.last_batch().unwrap();

        // Gate stays closed until the next tick.
        assert_eq!(counter.try_flush().await, FlushOutcome::GateClosed);

        store.set_fail_writes(false);
        counter.gate().open();
        assert_eq!(counter.try_flush().await, FlushOutcome::Flushed(2));
        assert_eq!(store.last_batch().unwrap(), failed_batch);
        assert_eq!(store.batch_calls(), 2);

        let stats = counter.stats().await;
        assert_eq!(stats.flush_failures, 1);
        assert_eq!(stats.flushes, 1);
    }

    #[tokio::test]
    async fn test_spawned_flush_runs_once_per_window() {
        let store = Arc::new(RecordingStore::new());
        let counter = counter_over(&store);

        counter.increment("a").await;
        counter.gate().open();

        let first = counter.spawn_flush();
        let second = counter.spawn_flush();
        let mut outcomes = vec![first.await.unwrap(), second.await.unwrap()];
        outcomes.sort_by_key(|o| matches!(o, FlushOutcome::GateClosed));

        assert_eq!(outcomes, vec![FlushOutcome::Flushed(1), FlushOutcome::GateClosed]);
        assert_eq!(store.batch_calls(), 1);
    }

    #[tokio::test]
    async fn test_hit_during_flush_write_is_dropped_from_pending() {
        let store = Arc::new(HeldStore::new());
        let counter = Arc::new(HitCounter::new(store.clone()));

        counter.increment("a").await;
        counter.gate().open();
        let flush = counter.spawn_flush();

        // Batch [a=1] is snapshotted and the write is now suspended.
        store.entered.notified().await;
        let bumped = counter.increment("a").await;

        store.release.notify_one();
        assert_eq!(flush.await.unwrap(), FlushOutcome::Flushed(1));

        assert_eq!(bumped.count, 2);
        assert_eq!(counter.pending_len().await, 0);
        assert_eq!(store.persisted("a").await, Some(1));
    }

    #[tokio::test]
    async fn test_record_hit_read_failure_returns_zero() {
        let store = Arc::new(RecordingStore::new());
        store.set_fail_reads(true);
        let counter = counter_over(&store);

        let entry = counter.record_hit("home").await;

        assert_eq!(entry, CounterEntry::zero("home"));
        assert!(!counter.is_pending("home").await);
    }

    #[tokio::test]
    async fn test_drain_ignores_gate() {
        let store = Arc::new(RecordingStore::new());
        let counter = counter_over(&store);

        counter.increment("a").await;

        assert_eq!(counter.drain().await, FlushOutcome::Flushed(1));
        assert_eq!(store.persisted("a").await, Some(1));
    }
}
