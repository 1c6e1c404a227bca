//! Internal route configuration.
//!
//! All endpoints here require the shared internal secret via
//! [`crate::api::middleware::internal_auth`].

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::api::handlers::{purge_handler, stats_handler};
use crate::api::middleware::internal_auth;
use crate::state::AppState;

/// Internal-only routes, protected by the shared-secret middleware.
///
/// # Endpoints
///
/// - `POST /purge/{token}` - Invalidate the cached state for a token
/// - `GET  /stats`         - Time-bucketed event counts (aggregator passthrough)
pub fn internal_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/purge/{token}", post(purge_handler))
        .route("/stats", get(stats_handler))
        .layer(middleware::from_fn_with_state(state, internal_auth::layer))
}
