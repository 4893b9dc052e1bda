//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`   - Health check (public)
//! - everything else  - see [`crate::api::routes::routes`]
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}

/// All routes with tracing, before path normalization.
///
/// Integration tests drive this directly since the test server needs a plain
/// [`Router`].
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .merge(api::routes::routes())
        .with_state(state)
        .layer(tracing::layer())
}
