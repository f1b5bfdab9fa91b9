//! Durable Store Module
//!
//! The persistent side of the write-behind cache. The counter core only
//! talks to [`CounterStore`]; concrete adapters live in submodules.

mod file;
mod memory;

use async_trait::async_trait;

use crate::counter::CounterEntry;
use crate::error::StoreResult;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

// == Counter Store Trait ==
/// Remote or local persistent key-count store.
///
/// Used as `Arc<dyn CounterStore>`.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Point lookup of the last persisted count.
    ///
    /// Returns `Ok(None)` when the name has never been persisted.
    async fn get_count(&self, name: &str) -> StoreResult<Option<CounterEntry>>;

    /// Persists a batch of counts as one pass/fail unit.
    ///
    /// Each entry replaces the stored count for its name.
    async fn set_count_batch(&self, entries: &[CounterEntry]) -> StoreResult<()>;
}
