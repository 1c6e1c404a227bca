//! HTTP server initialization and runtime setup.
//!
//! Handles cache setup, collaborator clients, worker spawning, and Axum server
//! lifecycle.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::application::services::{Destinations, EventRecorder, TagCacheService, TargetResolver};
use crate::config::Config;
use crate::domain::event_worker::run_event_worker;
use crate::infrastructure::cache::{CacheStore, NullStore, RedisStore};
use crate::infrastructure::http::{HttpAggregatorClient, HttpEventSink, HttpLookupClient};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::privacy::PrivacyHasher;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Redis cache store (or NullStore fallback)
/// - Lookup, ingestion, and aggregation HTTP clients
/// - Background analytics event worker
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if a client cannot be constructed, the bind fails, or a
/// server runtime error occurs.
pub async fn run(config: Config) -> Result<()> {
    let store: Arc<dyn CacheStore> = if let Some(redis_url) = &config.redis_url {
        match RedisStore::connect(redis_url).await {
            Ok(redis) => {
                tracing::info!("Cache enabled (Redis)");
                Arc::new(redis)
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using NullStore.", e);
                Arc::new(NullStore::new())
            }
        }
    } else {
        tracing::info!("Cache disabled (NullStore)");
        Arc::new(NullStore::new())
    };

    let lookup_timeout = Duration::from_millis(config.lookup_timeout_ms);
    let ingest_timeout = Duration::from_millis(config.ingest_timeout_ms);

    let lookup_client = Arc::new(HttpLookupClient::new(
        &config.tag_lookup_url,
        &config.internal_secret,
        lookup_timeout,
    )?);
    let event_sink = Arc::new(HttpEventSink::new(
        &config.event_ingest_url,
        &config.internal_secret,
        ingest_timeout,
    )?);
    let aggregator = Arc::new(HttpAggregatorClient::new(
        &config.analytics_url,
        &config.internal_secret,
        ingest_timeout,
    )?);

    let (event_tx, event_rx) = mpsc::channel(config.event_queue_capacity);
    tokio::spawn(run_event_worker(
        event_rx,
        event_sink,
        config.event_worker_concurrency,
    ));
    tracing::info!("Event worker started");

    let tags = Arc::new(TagCacheService::new(
        store,
        lookup_client.clone(),
        config.cache_ttl_seconds,
    ));
    let resolver = Arc::new(TargetResolver::new(
        lookup_client,
        Destinations::from_site_base(&config.site_base_url),
    ));
    let recorder = EventRecorder::new(
        PrivacyHasher::new(&config.privacy_hash_secret),
        event_tx,
    );

    let state = AppState {
        tags,
        resolver,
        recorder,
        aggregator,
        internal_secret: config.internal_secret.clone(),
    };

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
