#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::extract::ConnectInfo;
use tokio::sync::mpsc;

use tag_resolver::application::services::{
    Destinations, EventRecorder, TagCacheService, TargetResolver,
};
use tag_resolver::domain::collaborators::{
    AccountLookup, AnalyticsAggregator, EventBucket, EventSink, Granularity, LookupError,
    TagLookup, TimeRange,
};
use tag_resolver::domain::entities::{
    AnalyticsEvent, TagState, TagStatus, TargetType,
};
use tag_resolver::infrastructure::cache::{CacheResult, CacheStore};
use tag_resolver::state::AppState;
use tag_resolver::utils::privacy::PrivacyHasher;

pub const TEST_SECRET: &str = "test-internal-secret";
pub const SITE_BASE: &str = "https://site.test";

/// In-memory cache store; records TTLs but does not expire entries.
#[derive(Default)]
pub struct InMemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().unwrap().contains_key(key)
    }
}

#[async_trait]
impl CacheStore for InMemoryStore {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str, _ttl_seconds: u64) -> CacheResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

/// Scriptable stand-in for the lookup service, counting upstream calls.
#[derive(Default)]
pub struct StubLookup {
    tags: Mutex<HashMap<String, TagState>>,
    handles: Mutex<HashMap<String, String>>,
    tag_calls: AtomicUsize,
    fail: AtomicBool,
}

impl StubLookup {
    pub fn insert_tag(&self, token: &str, state: TagState) {
        self.tags.lock().unwrap().insert(token.to_string(), state);
    }

    pub fn insert_handle(&self, owner_id: &str, handle: &str) {
        self.handles
            .lock()
            .unwrap()
            .insert(owner_id.to_string(), handle.to_string());
    }

    /// Makes every subsequent lookup fail as if the service were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.fail.store(unavailable, Ordering::SeqCst);
    }

    pub fn tag_calls(&self) -> usize {
        self.tag_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TagLookup for StubLookup {
    async fn fetch_tag(&self, token: &str) -> Result<Option<TagState>, LookupError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(LookupError::Unavailable("lookup service down".to_string()));
        }
        self.tag_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.tags.lock().unwrap().get(token).cloned())
    }
}

#[async_trait]
impl AccountLookup for StubLookup {
    async fn fetch_handle(&self, owner_id: &str) -> Result<Option<String>, LookupError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(LookupError::Unavailable("lookup service down".to_string()));
        }
        Ok(self.handles.lock().unwrap().get(owner_id).cloned())
    }
}

/// Event sink collecting submitted events, optionally failing every call.
#[derive(Default)]
pub struct CollectingSink {
    pub events: Mutex<Vec<AnalyticsEvent>>,
    fail: AtomicBool,
}

impl CollectingSink {
    pub fn set_unavailable(&self, unavailable: bool) {
        self.fail.store(unavailable, Ordering::SeqCst);
    }

    pub fn submitted(&self) -> Vec<AnalyticsEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventSink for CollectingSink {
    async fn submit(&self, event: &AnalyticsEvent) -> Result<(), LookupError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(LookupError::Unavailable("ingestion down".to_string()));
        }
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

/// Aggregator returning a fixed set of buckets.
#[derive(Default)]
pub struct StubAggregator {
    pub buckets: Vec<EventBucket>,
}

#[async_trait]
impl AnalyticsAggregator for StubAggregator {
    async fn bucket_counts(
        &self,
        _account_id: &str,
        _range: TimeRange,
        _granularity: Granularity,
    ) -> Result<Vec<EventBucket>, LookupError> {
        Ok(self.buckets.clone())
    }
}

/// Builds an [`AppState`] wired to in-memory fakes.
///
/// Returns the receiving side of the event channel so tests can assert what
/// the redirect path queued.
pub fn create_test_state(
    store: Arc<InMemoryStore>,
    lookup: Arc<StubLookup>,
) -> (AppState, mpsc::Receiver<AnalyticsEvent>) {
    create_test_state_with_aggregator(store, lookup, Arc::new(StubAggregator::default()))
}

pub fn create_test_state_with_aggregator(
    store: Arc<InMemoryStore>,
    lookup: Arc<StubLookup>,
    aggregator: Arc<dyn AnalyticsAggregator>,
) -> (AppState, mpsc::Receiver<AnalyticsEvent>) {
    let (tx, rx) = mpsc::channel(100);

    let tags = Arc::new(TagCacheService::new(store, lookup.clone(), 60));
    let resolver = Arc::new(TargetResolver::new(
        lookup,
        Destinations::from_site_base(SITE_BASE),
    ));
    let recorder = EventRecorder::new(PrivacyHasher::new("test-salt-secret"), tx);

    let state = AppState {
        tags,
        resolver,
        recorder,
        aggregator,
        internal_secret: TEST_SECRET.to_string(),
    };

    (state, rx)
}

/// Active tag pointing at an external URL.
pub fn url_tag(id: &str, target: &str) -> TagState {
    TagState {
        id: id.to_string(),
        status: TagStatus::Active,
        owner_id: Some("u1".to_string()),
        target_type: TargetType::Url,
        target_url: Some(target.to_string()),
        target_profile_slug: None,
    }
}

/// Active tag pointing at its owner's profile.
pub fn profile_tag(id: &str, owner_id: Option<&str>, slug: Option<&str>) -> TagState {
    TagState {
        id: id.to_string(),
        status: TagStatus::Active,
        owner_id: owner_id.map(String::from),
        target_type: TargetType::Profile,
        target_url: None,
        target_profile_slug: slug.map(String::from),
    }
}

/// Injects a fixed peer address so handlers using `ConnectInfo` work under
/// `axum_test::TestServer`.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> tower::Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "203.0.113.7:40000".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}

/// Full application router with the mocked peer address.
pub fn test_app(state: AppState) -> axum::Router {
    tag_resolver::routes::app_router(state).layer(MockConnectInfoLayer)
}
