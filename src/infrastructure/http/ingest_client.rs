//! HTTP client for the analytics event ingestion service.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use super::INTERNAL_SECRET_HEADER;
use crate::domain::collaborators::{EventSink, LookupError};
use crate::domain::entities::AnalyticsEvent;

/// Client posting validated analytics events to the ingestion endpoint.
///
/// `POST {base}/events` with the event as JSON. The endpoint schema-validates
/// the event type enum and rejects malformed payloads with a 4xx, which maps
/// to [`LookupError::Protocol`].
pub struct HttpEventSink {
    client: reqwest::Client,
    events_url: String,
    internal_secret: String,
}

impl HttpEventSink {
    /// Builds the sink with an explicit per-request deadline.
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
            events_url: format!("{}/events", base_url.into().trim_end_matches('/')),
            internal_secret: internal_secret.into(),
        })
    }
}

#[async_trait]
impl EventSink for HttpEventSink {
    async fn submit(&self, event: &AnalyticsEvent) -> Result<(), LookupError> {
        debug!(tag_id = %event.tag_id, "Submitting analytics event");

        let response = self
            .client
            .post(&self.events_url)
            .header(INTERNAL_SECRET_HEADER, &self.internal_secret)
            .json(event)
            .send()
            .await
            .map_err(|e| LookupError::Unavailable(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else if status.is_server_error() {
            Err(LookupError::Unavailable(format!(
                "ingestion replied {}",
                status
            )))
        } else {
            Err(LookupError::Protocol(format!(
                "ingestion rejected event with {}",
                status
            )))
        }
    }
}
