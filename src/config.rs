//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;

use crate::badge::{DEFAULT_PLACES, DEFAULT_THEME};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Seconds between flush windows
    pub flush_interval: u64,
    /// Minimum digits drawn on a badge
    pub digit_places: usize,
    /// Theme used when a request names none
    pub default_theme: String,
    /// Public base URL shown on the index page
    pub site: Option<String>,
    /// JSON file backing the counts; in-memory when unset
    pub store_path: Option<PathBuf>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `FLUSH_INTERVAL` - Flush window in seconds (default: 60)
    /// - `DIGIT_PLACES` - Minimum badge digits (default: 7)
    /// - `DEFAULT_THEME` - Badge theme (default: moebooru)
    /// - `SITE` - Public base URL (optional)
    /// - `STORE_PATH` - Counts file (optional)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            flush_interval: parse_var::<u64>("FLUSH_INTERVAL")
                .filter(|&secs| secs > 0)
                .unwrap_or(defaults.flush_interval),
            digit_places: parse_var("DIGIT_PLACES").unwrap_or(defaults.digit_places),
            default_theme: env::var("DEFAULT_THEME").unwrap_or(defaults.default_theme),
            site: non_empty_var("SITE"),
            store_path: non_empty_var("STORE_PATH").map(PathBuf::from),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            flush_interval: 60,
            digit_places: DEFAULT_PLACES,
            default_theme: DEFAULT_THEME.to_string(),
            site: None,
            store_path: None,
        }
    }
}
