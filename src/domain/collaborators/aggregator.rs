//! Boundary contract for time-bucketed analytics rollups.
//!
//! Aggregation itself happens in the external analytics service; this system
//! only guarantees that recorded events carry the fields the aggregator needs
//! (tag id, event type, device, referrer host, country) and exposes the rollup
//! to dashboard and export consumers through an internal endpoint.

use super::LookupError;
use crate::domain::entities::EventType;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Bucket width for aggregated counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Hour,
    Day,
}

/// Inclusive-start, exclusive-end query window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

/// Per-bucket event counts grouped by event type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventBucket {
    /// Start of the bucket, aligned to the requested granularity.
    pub bucket: DateTime<Utc>,
    pub counts: HashMap<EventType, u64>,
}

/// Rollup queries over recorded analytics events.
///
/// # Implementations
///
/// - [`crate::infrastructure::http::HttpAggregatorClient`] - Proxy to the
///   external analytics service
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalyticsAggregator: Send + Sync {
    /// Returns per-bucket counts by event type for an account and time range.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] when the analytics service is unreachable or
    /// rejects the query.
    async fn bucket_counts(
        &self,
        account_id: &str,
        range: TimeRange,
        granularity: Granularity,
    ) -> Result<Vec<EventBucket>, LookupError>;
}
