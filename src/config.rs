//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Required Variables
//!
//! - `TAG_LOOKUP_URL` - Base URL of the internal tag/account lookup service
//! - `EVENT_INGEST_URL` - Base URL of the analytics event ingestion service
//!
//! In production (`APP_ENV=production`) additionally:
//!
//! - `INTERNAL_SHARED_SECRET` - Shared secret for internal endpoints and
//!   outbound collaborator calls
//! - `PRIVACY_HASH_SECRET` - Secret component of the daily-rotating IP hash salt
//!
//! Outside production these two fall back to fixed development strings so the
//! service runs without setup; a missing secret in production is a fatal
//! configuration error, never a silent fallback.
//!
//! ## Optional Variables
//!
//! - `ANALYTICS_URL` - Analytics rollup service (default: `TAG_LOOKUP_URL`)
//! - `REDIS_URL` / `REDIS_HOST` - Redis connection (enables caching if set)
//! - `SITE_BASE_URL` - Public site for profile and fallback pages
//!   (default: `http://localhost:3000`)
//! - `LISTEN` - Bind address (default: `0.0.0.0:8080`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `CACHE_TTL_SECONDS` - TTL for cached tag state (default: 60)
//! - `EVENT_QUEUE_CAPACITY` - Analytics event buffer size (default: 10000, min: 100)
//! - `EVENT_WORKER_CONCURRENCY` - Max in-flight event submissions (default: 4)
//! - `LOOKUP_TIMEOUT_MS` - Deadline for lookup-service calls (default: 800)
//! - `INGEST_TIMEOUT_MS` - Deadline for event-ingestion calls (default: 2500)

use anyhow::{Context, Result};
use std::env;

/// Development fallback for the internal shared secret. Never used in production.
const DEV_INTERNAL_SECRET: &str = "dev-internal-secret";
/// Development fallback for the privacy hash secret. Never used in production.
const DEV_PRIVACY_SECRET: &str = "dev-privacy-hash-secret";

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the tag/account lookup service.
    pub tag_lookup_url: String,
    /// Base URL of the event ingestion service.
    pub event_ingest_url: String,
    /// Base URL of the analytics rollup service.
    pub analytics_url: String,
    pub redis_url: Option<String>,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// True when `APP_ENV=production`. Tightens secret handling.
    pub production: bool,
    /// Exact-match secret required on internal endpoints and attached to
    /// outbound collaborator calls.
    pub internal_secret: String,
    /// Secret component of the daily-rotating IP hash salt.
    pub privacy_hash_secret: String,
    /// Public site hosting profile pages and the static fallback destinations.
    pub site_base_url: String,
    /// TTL (seconds) for cached tag state in Redis.
    pub cache_ttl_seconds: u64,
    /// Analytics event channel capacity; overflowing events are dropped.
    pub event_queue_capacity: usize,
    /// Maximum number of event submissions in flight at once.
    pub event_worker_concurrency: usize,
    /// Deadline for lookup-service calls in milliseconds.
    pub lookup_timeout_ms: u64,
    /// Deadline for event-ingestion calls in milliseconds.
    pub ingest_timeout_ms: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing, including either
    /// secret when running in production.
    pub fn from_env() -> Result<Self> {
        let production = env::var("APP_ENV")
            .map(|v| v.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        let tag_lookup_url = env::var("TAG_LOOKUP_URL").context("TAG_LOOKUP_URL must be set")?;
        let event_ingest_url =
            env::var("EVENT_INGEST_URL").context("EVENT_INGEST_URL must be set")?;
        let analytics_url = env::var("ANALYTICS_URL").unwrap_or_else(|_| tag_lookup_url.clone());

        let internal_secret = Self::load_secret("INTERNAL_SHARED_SECRET", production)?;
        let privacy_hash_secret = Self::load_secret("PRIVACY_HASH_SECRET", production)?;

        let redis_url = Self::load_redis_url();

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
        let site_base_url =
            env::var("SITE_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

        let cache_ttl_seconds = env::var("CACHE_TTL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);

        let event_queue_capacity = env::var("EVENT_QUEUE_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10_000);

        let event_worker_concurrency = env::var("EVENT_WORKER_CONCURRENCY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(4);

        let lookup_timeout_ms = env::var("LOOKUP_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(800);

        let ingest_timeout_ms = env::var("INGEST_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(2500);

        Ok(Self {
            tag_lookup_url,
            event_ingest_url,
            analytics_url,
            redis_url,
            listen_addr,
            log_level,
            log_format,
            production,
            internal_secret,
            privacy_hash_secret,
            site_base_url,
            cache_ttl_seconds,
            event_queue_capacity,
            event_worker_concurrency,
            lookup_timeout_ms,
            ingest_timeout_ms,
        })
    }

    /// Loads a secret with a development fallback.
    ///
    /// In production the variable is required and must be non-empty; anything
    /// else is a fatal configuration error.
    fn load_secret(name: &'static str, production: bool) -> Result<String> {
        match env::var(name) {
            Ok(value) if !value.is_empty() => Ok(value),
            _ if production => {
                anyhow::bail!("{} must be set to a non-empty value in production", name)
            }
            _ => Ok(match name {
                "PRIVACY_HASH_SECRET" => DEV_PRIVACY_SECRET.to_string(),
                _ => DEV_INTERNAL_SECRET.to_string(),
            }),
        }
    }

    /// Loads Redis URL with fallback to component-based configuration.
    ///
    /// Priority:
    /// 1. `REDIS_URL` environment variable
    /// 2. Constructed from `REDIS_HOST`, `REDIS_PORT`, `REDIS_PASSWORD`, `REDIS_DB`
    ///
    /// Returns `None` if Redis is not configured.
    fn load_redis_url() -> Option<String> {
        if let Ok(url) = env::var("REDIS_URL") {
            return Some(url);
        }

        let host = env::var("REDIS_HOST").ok()?;
        let port = env::var("REDIS_PORT").unwrap_or_else(|_| "6379".to_string());
        let password = env::var("REDIS_PASSWORD").ok();
        let db = env::var("REDIS_DB").unwrap_or_else(|_| "0".to_string());

        let url = if let Some(pwd) = password {
            // Empty password means no authentication
            if pwd.is_empty() {
                format!("redis://{}:{}/{}", host, port, db)
            } else {
                format!("redis://:{}@{}:{}/{}", pwd, host, port, db)
            }
        } else {
            format!("redis://{}:{}/{}", host, port, db)
        };

        Some(url)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - a service URL does not use `http` / `https`
    /// - `event_queue_capacity` is outside `100..=1_000_000`
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - a TTL, timeout, or concurrency value is out of range
    pub fn validate(&self) -> Result<()> {
        for (name, url) in [
            ("TAG_LOOKUP_URL", &self.tag_lookup_url),
            ("EVENT_INGEST_URL", &self.event_ingest_url),
            ("ANALYTICS_URL", &self.analytics_url),
            ("SITE_BASE_URL", &self.site_base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("{} must start with 'http://' or 'https://', got '{}'", name, url);
            }
        }

        if self.event_queue_capacity < 100 {
            anyhow::bail!(
                "EVENT_QUEUE_CAPACITY must be at least 100, got {}",
                self.event_queue_capacity
            );
        }

        if self.event_queue_capacity > 1_000_000 {
            anyhow::bail!(
                "EVENT_QUEUE_CAPACITY is too large (max: 1000000), got {}",
                self.event_queue_capacity
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if let Some(ref redis_url) = self.redis_url
            && !redis_url.starts_with("redis://")
            && !redis_url.starts_with("rediss://")
        {
            anyhow::bail!(
                "REDIS_URL must start with 'redis://' or 'rediss://', got '{}'",
                redis_url
            );
        }

        if self.cache_ttl_seconds == 0 {
            anyhow::bail!("CACHE_TTL_SECONDS must be greater than 0");
        }

        if self.event_worker_concurrency == 0 || self.event_worker_concurrency > 256 {
            anyhow::bail!(
                "EVENT_WORKER_CONCURRENCY must be between 1 and 256, got {}",
                self.event_worker_concurrency
            );
        }

        if self.lookup_timeout_ms == 0 || self.lookup_timeout_ms > 10_000 {
            anyhow::bail!(
                "LOOKUP_TIMEOUT_MS must be between 1 and 10000, got {}",
                self.lookup_timeout_ms
            );
        }

        if self.ingest_timeout_ms == 0 || self.ingest_timeout_ms > 30_000 {
            anyhow::bail!(
                "INGEST_TIMEOUT_MS must be between 1 and 30000, got {}",
                self.ingest_timeout_ms
            );
        }

        if self.internal_secret.is_empty() {
            anyhow::bail!("INTERNAL_SHARED_SECRET must not be empty");
        }

        if self.privacy_hash_secret.is_empty() {
            anyhow::bail!("PRIVACY_HASH_SECRET must not be empty");
        }

        Ok(())
    }

    /// Returns whether Redis caching is enabled.
    pub fn is_cache_enabled(&self) -> bool {
        self.redis_url.is_some()
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Environment: {}", if self.production { "production" } else { "development" });
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Tag lookup: {}", self.tag_lookup_url);
        tracing::info!("  Event ingestion: {}", self.event_ingest_url);
        tracing::info!("  Analytics: {}", self.analytics_url);

        if let Some(ref redis_url) = self.redis_url {
            tracing::info!("  Redis: {} (enabled)", mask_connection_string(redis_url));
        } else {
            tracing::info!("  Redis: disabled");
        }

        tracing::info!("  Cache TTL: {}s", self.cache_ttl_seconds);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!("  Event queue capacity: {}", self.event_queue_capacity);
    }
}

/// Masks sensitive information in connection strings for logging.
///
/// Replaces password with `***` in URLs like:
/// - `redis://:password@host:port/db` → `redis://:***@host:port/db`
fn mask_connection_string(url: &str) -> String {
    if let Some(start) = url.find("://") {
        let scheme_end = start + 3;
        let rest = &url[scheme_end..];

        if let Some(at_pos) = rest.find('@') {
            let credentials = &rest[..at_pos];
            let host_part = &rest[at_pos..];

            if let Some(colon_pos) = credentials.rfind(':') {
                let username = &credentials[..colon_pos];
                return format!("{}://{}:***{}", &url[..start], username, host_part);
            }
        }
    }

    url.to_string()
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
