//! Moe Counter - A hit-counter badge server
//!
//! Counts hits per name in memory and persists them to a durable store in
//! batches, at most once per flush interval.

pub mod api;
pub mod badge;
pub mod config;
pub mod counter;
pub mod error;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use counter::HitCounter;
pub use tasks::spawn_flush_timer;
