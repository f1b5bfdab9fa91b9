//! Request DTOs for the counter server API
//!
//! Defines the query strings and path segments accepted by the API.

use serde::Deserialize;

use crate::counter::MAX_NAME_LENGTH;

/// Query string for badge requests (GET /get/@:name)
///
/// # Fields
/// - `theme`: Theme name; the configured default when absent
/// - `length`: Minimum digits to draw; the configured default when absent
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BadgeQuery {
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub length: Option<usize>,
}

/// A validated counter name taken from an `@name` path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterName(String);

impl CounterName {
    /// Parses a path segment of the form `@name`.
    ///
    /// Returns an error message if validation fails.
    pub fn from_segment(segment: &str) -> Result<Self, String> {
        let name = segment
            .strip_prefix('@')
            .ok_or_else(|| "Counter name must start with '@'".to_string())?;
        if name.is_empty() {
            return Err("Counter name cannot be empty".to_string());
        }
        if name.len() > MAX_NAME_LENGTH {
            return Err(format!(
                "Counter name exceeds maximum length of {} characters",
                MAX_NAME_LENGTH
            ));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
