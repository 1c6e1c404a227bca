//! Collaborator trait for analytics event ingestion.

use super::LookupError;
use crate::domain::entities::AnalyticsEvent;
use async_trait::async_trait;

/// Accepts validated analytics events for durable storage.
///
/// Submission is strictly best-effort from the caller's point of view: the
/// background worker logs and counts failures but never propagates them
/// toward the redirect path.
///
/// # Implementations
///
/// - [`crate::infrastructure::http::HttpEventSink`] - Production HTTP client
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Submits one event to the ingestion endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Unavailable`] on timeout or connection failure,
    /// [`LookupError::Protocol`] when the endpoint rejects the payload.
    async fn submit(&self, event: &AnalyticsEvent) -> Result<(), LookupError>;
}
