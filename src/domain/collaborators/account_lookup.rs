//! Collaborator trait for owner to public-handle resolution.

use super::LookupError;
use async_trait::async_trait;

/// Resolves an owning account's identifier to its public handle.
///
/// Used by the target resolver to compose profile paths like `/{handle}`.
///
/// # Implementations
///
/// - [`crate::infrastructure::http::HttpLookupClient`] - Production HTTP client
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountLookup: Send + Sync {
    /// Fetches the public handle for an owner id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(handle))` when the account exists and has a handle
    /// - `Ok(None)` when no handle is resolvable
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] on upstream failures; the resolver degrades
    /// these to the registration destination rather than failing the scan.
    async fn fetch_handle(&self, owner_id: &str) -> Result<Option<String>, LookupError>;
}
