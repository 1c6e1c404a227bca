//! Key-value store layer backing the tag cache.
//!
//! Provides a [`CacheStore`] trait with two implementations:
//! - [`RedisStore`] - Production Redis-backed store
//! - [`NullStore`] - No-op implementation for testing/disabled caching

mod null_store;
mod redis_store;
mod store;

pub use null_store::NullStore;
pub use redis_store::RedisStore;
pub use store::{CacheError, CacheResult, CacheStore};
