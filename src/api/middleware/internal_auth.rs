//! Shared-secret authentication for internal endpoints.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use serde_json::json;

use crate::error::AppError;
use crate::infrastructure::http::INTERNAL_SECRET_HEADER;
use crate::state::AppState;

/// Authenticates internal requests via the `x-internal-secret` header.
///
/// # Authentication Flow
///
/// 1. Read the header value
/// 2. Compare against the configured shared secret with an exact match
/// 3. Continue to the handler only on a match
///
/// # Errors
///
/// Returns `401 Unauthorized` if:
/// - The header is missing or not valid UTF-8
/// - The value does not exactly match the configured secret
/// - The configured secret is empty (never silently open, even though config
///   validation rejects this at startup)
///
/// Rejection happens before the handler runs, so a failed call has no side
/// effects.
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let provided = req
        .headers()
        .get(INTERNAL_SECRET_HEADER)
        .and_then(|v| v.to_str().ok());

    if st.internal_secret.is_empty() || provided != Some(st.internal_secret.as_str()) {
        return Err(AppError::unauthorized(
            "Unauthorized",
            json!({ "reason": "missing or invalid internal secret" }),
        ));
    }

    Ok(next.run(req).await)
}
