//! JSON File Store Module
//!
//! A `CounterStore` persisted as a single JSON object on disk.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::counter::CounterEntry;
use crate::error::StoreResult;
use crate::store::CounterStore;

// == JSON File Store ==
/// Store adapter writing `{ "name": count, ... }` to a file.
///
/// The whole document is rewritten on every batch: the new content goes to a
/// sibling temp file which is then renamed over the original, so readers
/// never see a half-written document.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    counts: RwLock<BTreeMap<String, u64>>,
}

impl JsonFileStore {
    // == Open ==
    /// Opens the store at `path`, loading existing counts.
    ///
    /// A missing file is treated as an empty store and created on first write.
    pub async fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();

        let counts: BTreeMap<String, u64> = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.is_empty() => BTreeMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        info!(
            "Opened counter file {} with {} names",
            path.display(),
            counts.len()
        );

        Ok(Self {
            path,
            counts: RwLock::new(counts),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl CounterStore for JsonFileStore {
    async fn get_count(&self, name: &str) -> StoreResult<Option<CounterEntry>> {
        let counts = self.counts.read().await;
        Ok(counts.get(name).map(|&count| CounterEntry::new(name, count)))
    }

    async fn set_count_batch(&self, entries: &[CounterEntry]) -> StoreResult<()> {
        // Hold the write lock across the file write so batches serialize.
        let mut counts = self.counts.write().await;

        let mut next = counts.clone();
        for entry in entries {
            next.insert(entry.name.clone(), entry.count);
        }

        let bytes = serde_json::to_vec_pretty(&next)?;
        let tmp = self.temp_path();
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        debug!(
            "Wrote {} entries to {}",
            entries.len(),
            self.path.display()
        );

        // Memory only moves forward once the file is on disk.
        *counts = next;
        Ok(())
    }
}
