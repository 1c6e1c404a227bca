//! HTTP client for the internal tag and account lookup service.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::INTERNAL_SECRET_HEADER;
use crate::domain::collaborators::{AccountLookup, LookupError, TagLookup};
use crate::domain::entities::TagState;

/// Client for the internal lookup service.
///
/// Exposes two routes, both authenticated by the shared internal secret:
///
/// - `GET {base}/tags/{token}` → [`TagState`] JSON or 404
/// - `GET {base}/accounts/{owner_id}/handle` → `{ "handle": "..." }` or 404
///
/// Every call carries a bounded timeout so a slow upstream degrades to the
/// resolver's fallback destinations instead of hanging the redirect.
pub struct HttpLookupClient {
    client: reqwest::Client,
    base_url: String,
    internal_secret: String,
}

#[derive(Debug, Deserialize)]
struct HandleResponse {
    handle: String,
}

impl HttpLookupClient {
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
            base_url: base_url.into().trim_end_matches('/').to_string(),
            internal_secret: internal_secret.into(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<Option<T>, LookupError> {
        let response = self
            .client
            .get(url)
            .header(INTERNAL_SECRET_HEADER, &self.internal_secret)
            .send()
            .await
            .map_err(|e| LookupError::Unavailable(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let body = response
                    .json::<T>()
                    .await
                    .map_err(|e| LookupError::Protocol(e.to_string()))?;
                Ok(Some(body))
            }
            status if status.is_server_error() => Err(LookupError::Unavailable(format!(
                "lookup service replied {}",
                status
            ))),
            status => Err(LookupError::Protocol(format!(
                "unexpected lookup status {}",
                status
            ))),
        }
    }
}

#[async_trait]
impl TagLookup for HttpLookupClient {
    async fn fetch_tag(&self, token: &str) -> Result<Option<TagState>, LookupError> {
        let url = format!("{}/tags/{}", self.base_url, token);
        debug!("Lookup: {}", url);

        self.get_json::<TagState>(&url).await
    }
}

#[async_trait]
impl AccountLookup for HttpLookupClient {
    async fn fetch_handle(&self, owner_id: &str) -> Result<Option<String>, LookupError> {
        let url = format!("{}/accounts/{}/handle", self.base_url, owner_id);
        debug!("Handle lookup: {}", url);

        Ok(self
            .get_json::<HandleResponse>(&url)
            .await?
            .map(|r| r.handle))
    }
}
