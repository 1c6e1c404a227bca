//! DTOs for the internal stats passthrough endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::collaborators::{EventBucket, Granularity};

/// Query parameters for `GET /internal/stats`.
#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    pub account_id: String,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    /// `hour` or `day`; defaults to `day`.
    pub granularity: Option<Granularity>,
}

/// Aggregated per-bucket counts for an account and time range.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub account_id: String,
    pub granularity: Granularity,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub buckets: Vec<EventBucket>,
}
