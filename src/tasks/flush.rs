//! Flush Timer Task
//!
//! Background task that opens the flush gate once per interval. The flush
//! itself is triggered by the next recorded hit, not by this task.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::counter::FlushGate;

/// Spawns a background task that opens `gate` every `flush_interval_secs`.
///
/// The gate is first opened one full interval after spawning. Missed ticks
/// are not replayed: a stalled runtime opens the gate once, not in a burst.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let counter = Arc::new(HitCounter::new(store));
/// let timer = spawn_flush_timer(counter.gate().clone(), 60);
/// // Later, during shutdown:
/// timer.abort();
/// ```
pub fn spawn_flush_timer(gate: Arc<FlushGate>, flush_interval_secs: u64) -> JoinHandle<()> {
    let period = Duration::from_secs(flush_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting flush timer with interval of {} seconds",
            period.as_secs()
        );

        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; the gate starts closed.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            gate.open();
            debug!("Flush gate opened");
        }
    })
}
