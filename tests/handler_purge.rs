mod common;

use std::sync::Arc;

use axum_test::TestServer;

use common::{InMemoryStore, StubLookup, TEST_SECRET, create_test_state, test_app, url_tag};

#[tokio::test]
async fn test_purge_requires_internal_secret() {
    let store = Arc::new(InMemoryStore::default());
    let (state, _rx) = create_test_state(store, Arc::new(StubLookup::default()));
    let server = TestServer::new(test_app(state)).unwrap();

    let response = server.post("/internal/purge/tok1").await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_purge_rejects_wrong_secret() {
    let store = Arc::new(InMemoryStore::default());
    let (state, _rx) = create_test_state(store, Arc::new(StubLookup::default()));
    let server = TestServer::new(test_app(state)).unwrap();

    let response = server
        .post("/internal/purge/tok1")
        .add_header("x-internal-secret", "wrong")
        .await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_purge_removes_cached_entry_and_forces_refetch() {
    let store = Arc::new(InMemoryStore::default());
    let lookup = Arc::new(StubLookup::default());
    lookup.insert_tag("tok1", url_tag("tag-1", "https://x.com"));

    let (state, _rx) = create_test_state(store.clone(), lookup.clone());
    let server = TestServer::new(test_app(state)).unwrap();

    // Populate the cache.
    server.get("/tok1").await;
    assert!(store.contains("hw:tok1"));

    let response = server
        .post("/internal/purge/tok1")
        .add_header("x-internal-secret", TEST_SECRET)
        .await;

    response.assert_status_ok();
    response.assert_json(&serde_json::json!({ "ok": true }));
    assert!(!store.contains("hw:tok1"));

    // Next scan must hit the lookup service again.
    server.get("/tok1").await;
    assert_eq!(lookup.tag_calls(), 2);
}

#[tokio::test]
async fn test_purge_is_idempotent_for_unknown_tokens() {
    let store = Arc::new(InMemoryStore::default());
    let (state, _rx) = create_test_state(store, Arc::new(StubLookup::default()));
    let server = TestServer::new(test_app(state)).unwrap();

    let response = server
        .post("/internal/purge/never-cached")
        .add_header("x-internal-secret", TEST_SECRET)
        .await;

    response.assert_status_ok();
    response.assert_json(&serde_json::json!({ "ok": true }));
}
