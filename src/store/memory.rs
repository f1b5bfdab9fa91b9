//! In-Memory Store Module
//!
//! A `CounterStore` held entirely in process memory.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::counter::CounterEntry;
use crate::error::StoreResult;
use crate::store::CounterStore;

// == Memory Store ==
/// Store adapter backed by a `HashMap`. Counts vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    counts: RwLock<HashMap<String, u64>>,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the given counts.
    pub fn with_counts<I, K>(counts: I) -> Self
    where
        I: IntoIterator<Item = (K, u64)>,
        K: Into<String>,
    {
        Self {
            counts: RwLock::new(counts.into_iter().map(|(k, v)| (k.into(), v)).collect()),
        }
    }

    /// Number of names persisted so far.
    pub async fn len(&self) -> usize {
        self.counts.read().await.len()
    }

    /// Returns true if nothing has been persisted.
    pub async fn is_empty(&self) -> bool {
        self.counts.read().await.is_empty()
    }
}

#[async_trait]
impl CounterStore for MemoryStore {
    async fn get_count(&self, name: &str) -> StoreResult<Option<CounterEntry>> {
        let counts = self.counts.read().await;
        Ok(counts.get(name).map(|&count| CounterEntry::new(name, count)))
    }

    async fn set_count_batch(&self, entries: &[CounterEntry]) -> StoreResult<()> {
        let mut counts = self.counts.write().await;
        for entry in entries {
            counts.insert(entry.name.clone(), entry.count);
        }
        Ok(())
    }
}
