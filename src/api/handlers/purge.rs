//! Handler for the internal cache purge endpoint.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};
use tracing::info;

use crate::state::AppState;

/// Invalidates the cached state for a token.
///
/// # Endpoint
///
/// `POST /internal/purge/{token}` (internal-secret protected)
///
/// Deletion is synchronous: once this returns, the next resolution for the
/// token misses the cache and refetches from the lookup service. Idempotent,
/// succeeds whether or not the key was cached.
pub async fn purge_handler(Path(token): Path<String>, State(state): State<AppState>) -> Json<Value> {
    state.tags.invalidate(&token).await;
    info!(%token, "Cache entry purged");

    Json(json!({ "ok": true }))
}
