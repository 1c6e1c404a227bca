//! Cache store trait and error types.

use async_trait::async_trait;
use std::fmt;

/// Errors that can occur during cache operations.
#[derive(Debug)]
pub enum CacheError {
    ConnectionError(String),
    OperationError(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Cache connection error: {}", e),
            Self::OperationError(e) => write!(f, "Cache operation error: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for the external key-value cache store.
///
/// Values are opaque strings (the cache layer above stores serialized tag
/// state). Implementations must be thread-safe and handle errors gracefully
/// without disrupting the application (cache failures degrade to lookup-service
/// calls).
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisStore`] - Redis-backed store with TTL support
/// - [`crate::infrastructure::cache::NullStore`] - No-op implementation for disabled caching
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Retrieves a value by key.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` on cache hit
    /// - `Ok(None)` on cache miss or error (fail-open behavior)
    ///
    /// # Errors
    ///
    /// Should not return errors in production implementations. Errors are logged
    /// and treated as cache misses.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores a value with a per-key TTL.
    ///
    /// # Errors
    ///
    /// Should not propagate errors to callers. Implementations should log errors
    /// and return `Ok(())` to avoid disrupting the request flow.
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> CacheResult<()>;

    /// Removes a key synchronously.
    ///
    /// Used by the internal purge operation; must take effect before the call
    /// returns so a subsequent read misses and refetches.
    ///
    /// # Errors
    ///
    /// Should not propagate errors to callers.
    async fn delete(&self, key: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    ///
    /// Used by health check endpoints to report cache status.
    async fn health_check(&self) -> bool;
}
