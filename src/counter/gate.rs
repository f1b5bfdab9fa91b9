//! Flush Gate Module
//!
//! Permits at most one flush attempt per timer tick.

use std::sync::atomic::{AtomicBool, Ordering};

// == Flush Gate ==
/// `closed --tick--> open --flush attempt--> closed`. Starts closed.
#[derive(Debug, Default)]
pub struct FlushGate {
    open: AtomicBool,
}

impl FlushGate {
    /// Creates a closed gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the gate. Called by the flush timer once per interval.
    pub fn open(&self) {
        self.open.store(true, Ordering::Release);
    }

    // == Try Close ==
    /// Claims the current window.
    ///
    /// Returns true for exactly one caller per opening; that caller owns the
    /// flush attempt. The gate is closed before any I/O starts.
    pub fn try_close(&self) -> bool {
        self.open
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }
}
