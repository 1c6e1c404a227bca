//! Top-level router composition.

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::routes::internal_routes;
use crate::state::AppState;

/// Builds the full application router.
///
/// - `GET /healthz` - Health check
/// - `/internal/*` - Secret-protected purge and stats endpoints
/// - `GET /{token}` - Public tag redirect (registered last so it does not
///   shadow the fixed routes)
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .nest("/internal", internal_routes(state.clone()))
        .route("/{token}", get(redirect_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
