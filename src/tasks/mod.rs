//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Flush timer: opens the flush gate once per configured interval

mod flush;

pub use flush::spawn_flush_timer;
