//! Cache-aside layer in front of the tag lookup service.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::collaborators::{LookupError, TagLookup};
use crate::domain::entities::TagState;
use crate::infrastructure::cache::CacheStore;

/// Cache key namespace for tag state, derived deterministically from the token.
fn cache_key(token: &str) -> String {
    format!("hw:{}", token)
}

/// Cache-aside resolution of tag state.
///
/// Owns the TTL and invalidation policy for cached tag state. Reads check the
/// key-value store first and fall back to the lookup service, populating the
/// cache on the way out. Negative lookups are never cached: an unclaimed or
/// not-yet-provisioned tag may become valid at any time, and caching absence
/// would delay that by up to the TTL.
///
/// Concurrent misses for the same token may each call the lookup service;
/// the lookup is cheap and idempotent, so no single-flight deduplication is
/// done here. Last write wins on the TTL'd key.
pub struct TagCacheService {
    store: Arc<dyn CacheStore>,
    lookup: Arc<dyn TagLookup>,
    ttl_seconds: u64,
}

impl TagCacheService {
    pub fn new(store: Arc<dyn CacheStore>, lookup: Arc<dyn TagLookup>, ttl_seconds: u64) -> Self {
        Self {
            store,
            lookup,
            ttl_seconds,
        }
    }

    /// Resolves tag state for a token, cache first.
    ///
    /// A hit returns without contacting the lookup service. On a miss the
    /// state is fetched, cached with the configured TTL, and returned.
    /// Cache-store failures are fail-open and degrade to a lookup call.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] only when the cache missed *and* the lookup
    /// service failed; callers degrade this to a fallback redirect.
    pub async fn get(&self, token: &str) -> Result<Option<TagState>, LookupError> {
        let key = cache_key(token);

        if let Ok(Some(raw)) = self.store.get(&key).await {
            match serde_json::from_str::<TagState>(&raw) {
                Ok(state) => {
                    metrics::counter!("tag_cache_hits").increment(1);
                    return Ok(Some(state));
                }
                Err(e) => {
                    // Corrupt entry (e.g. written by an older build): drop it
                    // and refetch.
                    warn!("Discarding undecodable cache entry {}: {}", key, e);
                    let _ = self.store.delete(&key).await;
                }
            }
        }

        metrics::counter!("tag_cache_misses").increment(1);

        let state = self.lookup.fetch_tag(token).await?;

        if let Some(ref state) = state {
            match serde_json::to_string(state) {
                Ok(raw) => {
                    // Store before returning; the write is fail-open.
                    let _ = self.store.set(&key, &raw, self.ttl_seconds).await;
                }
                Err(e) => warn!("Failed to serialize tag state for {}: {}", key, e),
            }
        }

        Ok(state)
    }

    /// Synchronously removes the cached entry for a token.
    ///
    /// Idempotent: succeeds whether or not the key existed. The next `get`
    /// for this token misses and refetches from the lookup service.
    pub async fn invalidate(&self, token: &str) {
        let key = cache_key(token);
        debug!("Purging cache entry {}", key);
        let _ = self.store.delete(&key).await;
    }

    /// Reports cache backend health for the health endpoint.
    pub async fn health_check(&self) -> bool {
        self.store.health_check().await
    }
}
