//! Handler for the internal analytics stats passthrough.

use axum::{
    Json,
    extract::{Query, State},
};
use serde_json::json;

use crate::api::dto::stats::{StatsQuery, StatsResponse};
use crate::domain::collaborators::{Granularity, LookupError, TimeRange};
use crate::error::AppError;
use crate::state::AppState;

/// Returns time-bucketed event counts for an account.
///
/// # Endpoint
///
/// `GET /internal/stats` (internal-secret protected)
///
/// # Query Parameters
///
/// - `account_id` (required)
/// - `from`, `to` (required): RFC3339 timestamps, inclusive-start exclusive-end
/// - `granularity` (optional): `hour` or `day` (default: `day`)
///
/// Aggregation happens in the external analytics service; this endpoint only
/// forwards the query for dashboard and export consumers.
///
/// # Errors
///
/// Returns 400 Bad Request for an inverted time range and 500 when the
/// analytics service is unreachable.
pub async fn stats_handler(
    State(state): State<AppState>,
    Query(params): Query<StatsQuery>,
) -> Result<Json<StatsResponse>, AppError> {
    if params.from >= params.to {
        return Err(AppError::bad_request(
            "'from' must be earlier than 'to'",
            json!({ "from": params.from, "to": params.to }),
        ));
    }

    let granularity = params.granularity.unwrap_or(Granularity::Day);
    let range = TimeRange {
        from: params.from,
        to: params.to,
    };

    let buckets = state
        .aggregator
        .bucket_counts(&params.account_id, range, granularity)
        .await
        .map_err(|e| match e {
            LookupError::Unavailable(msg) => {
                AppError::internal("Analytics service unavailable", json!({ "cause": msg }))
            }
            LookupError::Protocol(msg) => {
                AppError::internal("Analytics service error", json!({ "cause": msg }))
            }
        })?;

    Ok(Json(StatsResponse {
        account_id: params.account_id,
        granularity,
        from: params.from,
        to: params.to,
        buckets,
    }))
}
