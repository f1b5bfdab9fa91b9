//! API Routes
//!
//! Configures the Axum router with all counter server endpoints.

use axum::{routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    badge_handler, heart_beat_handler, index_handler, record_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /` - Usage page
/// - `GET /get/@:name` - Record a hit, SVG badge
/// - `GET /record/@:name` - Record a hit, JSON count
/// - `GET /heart-beat` - Liveness check
/// - `GET /stats` - Counter cache statistics
///
/// The `@` is part of the captured segment and checked by the handlers.
///
/// # Middleware
/// - CORS: Allows any origin so badges embed anywhere
/// - Compression: gzip when the client accepts it
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/get/:name", get(badge_handler))
        .route("/record/:name", get(record_handler))
        .route("/heart-beat", get(heart_beat_handler))
        .route("/stats", get(stats_handler))
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
