//! Store doubles for counter tests: one records calls and fails on demand,
//! one holds batch writes until released.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::counter::CounterEntry;
use crate::error::{StoreError, StoreResult};
use crate::store::{CounterStore, MemoryStore};

#[derive(Default)]
pub struct RecordingStore {
    inner: MemoryStore,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
    pub reads: AtomicUsize,
    pub batch_calls: AtomicUsize,
    pub batches: Mutex<Vec<Vec<CounterEntry>>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_counts(counts: &[(&str, u64)]) -> Self {
        Self {
            inner: MemoryStore::with_counts(counts.iter().map(|&(k, v)| (k, v))),
            ..Self::default()
        }
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn batch_calls(&self) -> usize {
        self.batch_calls.load(Ordering::SeqCst)
    }

    pub fn last_batch(&self) -> Option<Vec<CounterEntry>> {
        self.batches.lock().unwrap().last().cloned()
    }

    pub async fn persisted(&self, name: &str) -> Option<u64> {
        self.inner.get_count(name).await.unwrap().map(|e| e.count)
    }
}

#[async_trait]
impl CounterStore for RecordingStore {
    async fn get_count(&self, name: &str) -> StoreResult<Option<CounterEntry>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("read refused".to_string()));
        }
        self.inner.get_count(name).await
    }

    async fn set_count_batch(&self, entries: &[CounterEntry]) -> StoreResult<()> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        self.batches.lock().unwrap().push(entries.to_vec());
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("write refused".to_string()));
        }
        self.inner.set_count_batch(entries).await
    }
}

/// Store whose batch write suspends until the test releases it.
#[derive(Default)]
pub struct HeldStore {
    inner: MemoryStore,
    pub entered: Notify,
    pub release: Notify,
}

impl HeldStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn persisted(&self, name: &str) -> Option<u64> {
        self.inner.get_count(name).await.unwrap().map(|e| e.count)
    }
}

#[async_trait]
impl CounterStore for HeldStore {
    async fn get_count(&self, name: &str) -> StoreResult<Option<CounterEntry>> {
        self.inner.get_count(name).await
    }

    async fn set_count_batch(&self, entries: &[CounterEntry]) -> StoreResult<()> {
        self.entered.notify_one();
        self.release.notified().await;
        self.inner.set_count_batch(entries).await
    }
}
