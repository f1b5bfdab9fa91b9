//! API Module
//!
//! HTTP handlers and routing for the counter server.
//!
//! # Endpoints
//! - `GET /get/@:name` - Record a hit and return an SVG badge
//! - `GET /record/@:name` - Record a hit and return JSON
//! - `GET /heart-beat` - Liveness check
//! - `GET /stats` - Counter cache statistics
//! - `GET /` - Usage page

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
