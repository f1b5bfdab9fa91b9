//! Response DTOs for the counter server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::{Serialize, Serializer};

use crate::counter::{CounterStats, DEMO_DISPLAY};

/// What a hit request reports: a real count, or the demo placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tally {
    Count(u64),
    Demo,
}

impl Tally {
    /// Text drawn on the badge.
    pub fn display(&self) -> String {
        match self {
            Tally::Count(n) => n.to_string(),
            Tally::Demo => DEMO_DISPLAY.to_string(),
        }
    }
}

// Counts serialize as numbers, the demo placeholder as a string.
impl Serialize for Tally {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Tally::Count(n) => serializer.serialize_u64(*n),
            Tally::Demo => serializer.serialize_str(DEMO_DISPLAY),
        }
    }
}

/// Response body for the record endpoint (GET /record/@:name)
#[derive(Debug, Clone, Serialize)]
pub struct RecordResponse {
    /// Counter name
    pub name: String,
    /// Count after this hit
    pub num: Tally,
}

impl RecordResponse {
    pub fn new(name: impl Into<String>, num: Tally) -> Self {
        Self {
            name: name.into(),
            num,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: CounterStats,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CounterStats> for StatsResponse {
    fn from(stats: CounterStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            stats,
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
