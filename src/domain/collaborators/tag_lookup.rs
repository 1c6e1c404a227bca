//! Collaborator trait for token to tag-state resolution.

use super::LookupError;
use crate::domain::entities::TagState;
use async_trait::async_trait;

/// Resolves a public token to the current state of the physical tag.
///
/// Calls are cheap and idempotent; duplicate concurrent fetches for the same
/// token are tolerated by design, which is why the cache layer above this
/// trait does no single-flight deduplication.
///
/// # Implementations
///
/// - [`crate::infrastructure::http::HttpLookupClient`] - Production HTTP client
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagLookup: Send + Sync {
    /// Fetches the tag state for a token.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(state))` when the token is known
    /// - `Ok(None)` when the lookup service has no record for it
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Unavailable`] on timeout or connection failure,
    /// [`LookupError::Protocol`] on unexpected responses.
    async fn fetch_tag(&self, token: &str) -> Result<Option<TagState>, LookupError>;
}
