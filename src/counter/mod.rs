//! Counter Module
//!
//! Write-behind hit counting: pending counts live in memory and reach the
//! durable store in gated batches.

mod cache;
mod entry;
mod gate;
mod pending;
mod service;
mod stats;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export public types
pub use cache::CounterCache;
pub use entry::CounterEntry;
pub use gate::FlushGate;
pub use pending::PendingCache;
pub use service::{FlushOutcome, HitCounter};
pub use stats::CounterStats;

// == Public Constants ==
/// Maximum allowed counter name length in bytes
pub const MAX_NAME_LENGTH: usize = 256;

/// Name reserved for the preview badge; never counted
pub const DEMO_NAME: &str = "demo";

/// Display value shown for [`DEMO_NAME`]
pub const DEMO_DISPLAY: &str = "0123456789";
