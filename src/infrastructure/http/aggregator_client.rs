//! HTTP client proxying to the external analytics rollup service.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;

use super::INTERNAL_SECRET_HEADER;
use crate::domain::collaborators::{
    AnalyticsAggregator, EventBucket, Granularity, LookupError, TimeRange,
};

/// Client for the aggregation boundary.
///
/// `GET {base}/stats` with `account_id`, `from`, `to`, and `granularity`
/// query parameters; replies with a JSON array of buckets. This service never
/// aggregates locally, it only forwards the query.
pub struct HttpAggregatorClient {
    client: reqwest::Client,
    stats_url: String,
    internal_secret: String,
}

impl HttpAggregatorClient {
    /// Builds the client with an explicit per-request deadline.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying reqwest client cannot be constructed.
    pub fn new(
        base_url: impl Into<String>,
        internal_secret: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            stats_url: format!("{}/stats", base_url.into().trim_end_matches('/')),
            internal_secret: internal_secret.into(),
        })
    }
}

#[async_trait]
impl AnalyticsAggregator for HttpAggregatorClient {
    async fn bucket_counts(
        &self,
        account_id: &str,
        range: TimeRange,
        granularity: Granularity,
    ) -> Result<Vec<EventBucket>, LookupError> {
        let granularity = match granularity {
            Granularity::Hour => "hour",
            Granularity::Day => "day",
        };

        let response = self
            .client
            .get(&self.stats_url)
            .header(INTERNAL_SECRET_HEADER, &self.internal_secret)
            .query(&[
                ("account_id", account_id.to_string()),
                ("from", range.from.to_rfc3339()),
                ("to", range.to.to_rfc3339()),
                ("granularity", granularity.to_string()),
            ])
            .send()
            .await
            .map_err(|e| LookupError::Unavailable(e.to_string()))?;

        match response.status() {
            status if status.is_success() => response
                .json::<Vec<EventBucket>>()
                .await
                .map_err(|e| LookupError::Protocol(e.to_string())),
            StatusCode::NOT_FOUND => Ok(Vec::new()),
            status if status.is_server_error() => Err(LookupError::Unavailable(format!(
                "analytics service replied {}",
                status
            ))),
            status => Err(LookupError::Protocol(format!(
                "unexpected analytics status {}",
                status
            ))),
        }
    }
}
