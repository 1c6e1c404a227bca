//! Handler for the public tag redirect endpoint.

use axum::{
    extract::{ConnectInfo, Path, Query, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Redirect},
};
use serde_json::json;
use std::collections::HashMap;
use std::net::SocketAddr;
use tracing::error;

use crate::application::services::Resolution;
use crate::domain::entities::{EventType, ScanContext};
use crate::error::AppError;
use crate::state::AppState;

/// Resolves a scanned tag token to its redirect destination.
///
/// # Endpoint
///
/// `GET /{token}`
///
/// # Request Flow
///
/// 1. Resolve tag state through the cache-aside layer (cache hit or lookup
///    service call)
/// 2. Compute the redirect destination from the resolution policy
/// 3. Return 307 Temporary Redirect immediately
/// 4. Queue a `scan` analytics event as a side effect (fire-and-forget)
///
/// # Degradation
///
/// Every resolution failure terminates in a redirect: unknown tokens and an
/// unreachable lookup service go to the registration page, invalid stored
/// targets to the invalid-target page. The visitor scanned a physical object
/// and always gets a coherent response.
///
/// # Errors
///
/// Returns 400 Bad Request only for a malformed (blank) token. No other error
/// surfaces on this path.
pub async fn redirect_handler(
    Path(token): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<impl IntoResponse, AppError> {
    if token.trim().is_empty() {
        return Err(AppError::bad_request("Missing tag token", json!({})));
    }

    let resolution = match state.tags.get(&token).await {
        Ok(Some(tag_state)) => {
            let resolution = state.resolver.resolve(&tag_state).await;

            state
                .recorder
                .record(&tag_state.id, EventType::Scan, &scan_context(&headers, addr, &query));

            resolution
        }
        Ok(None) => Resolution::NotFound,
        Err(e) => {
            // Lookup unavailability is not the visitor's problem: degrade to
            // the registration page.
            error!(%token, "Tag lookup failed: {}", e);
            Resolution::NotFound
        }
    };

    let location = state.resolver.location_of(&resolution);

    Ok(Redirect::temporary(&location))
}

/// Collects request metadata for the analytics event.
fn scan_context(
    headers: &HeaderMap,
    addr: SocketAddr,
    query: &HashMap<String, String>,
) -> ScanContext {
    let header_str =
        |name: header::HeaderName| headers.get(name).and_then(|v| v.to_str().ok()).map(String::from);

    let utm: HashMap<String, String> = query
        .iter()
        .filter(|(k, _)| k.starts_with("utm_"))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    ScanContext {
        ip: Some(addr.ip().to_string()),
        user_agent: header_str(header::USER_AGENT),
        referrer: header_str(header::REFERER),
        // Coarse geo, populated by the edge proxy when available.
        country: headers
            .get("cf-ipcountry")
            .and_then(|v| v.to_str().ok())
            .map(String::from),
        utm: (!utm.is_empty()).then_some(utm),
    }
}
