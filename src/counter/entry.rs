//! Counter Entry Module
//!
//! A named count as it moves between the cache, the store and callers.

use serde::{Deserialize, Serialize};

// == Counter Entry ==
/// The authoritative or pending hit count for one named counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterEntry {
    /// Counter name
    pub name: String,
    /// Hits recorded so far
    pub count: u64,
}

impl CounterEntry {
    // == Constructor ==
    /// Creates a new entry.
    pub fn new(name: impl Into<String>, count: u64) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }

    /// The degraded result returned when the store cannot be read.
    pub fn zero(name: impl Into<String>) -> Self {
        Self::new(name, 0)
    }
}
