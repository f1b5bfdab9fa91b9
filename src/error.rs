//! Error types for the counter server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Counter Error Enum ==
/// Errors surfaced by the HTTP layer.
///
/// Store failures never reach this type: the counting path degrades them
/// into a zero count instead.
#[derive(Error, Debug)]
pub enum CounterError {
    /// Malformed counter name or query
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CounterError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            CounterError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// == Store Error Enum ==
/// Failure reported by a durable store adapter.
///
/// "Not found" is not an error; adapters return `Ok(None)` for it.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Backing file could not be read or written
    #[error("Store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Stored document could not be encoded or decoded
    #[error("Store serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Store refused or could not be reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

// == Result Type Aliases ==
/// Convenience Result type for the HTTP layer.
pub type Result<T> = std::result::Result<T, CounterError>;

/// Result type returned by store adapters.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
