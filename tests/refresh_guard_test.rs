//! Concurrent 401 handling
//!
//! Parallel requests that hit an expired token must share one refresh call.

mod helpers;

use std::time::Duration;

use assert_matches::assert_matches;
use futures::future::join_all;
use serde_json::json;
use wiremock::{
    matchers::{header, method, path},
    Mock, ResponseTemplate,
};

use eventhub::models::Event;
use eventhub::state::CredentialStore;
use eventhub::EventHubError;
use helpers::*;

fn event_json() -> serde_json::Value {
    json!({
        "_id": "e1",
        "title": "Spring Fest",
        "eventType": "FEST",
        "status": "ONGOING",
        "createdBy": "o1"
    })
}

async fn mount_event_endpoint(ctx: &TestContext) {
    Mock::given(method("GET"))
        .and(path("/api/events/e1"))
        .and(header("authorization", format!("Bearer {}", OLD_TOKEN).as_str()))
        .respond_with(unauthorized())
        .mount(ctx.server())
        .await;
    Mock::given(method("GET"))
        .and(path("/api/events/e1"))
        .and(header("authorization", format!("Bearer {}", NEW_TOKEN).as_str()))
        .respond_with(ok(event_json()))
        .expect(5)
        .mount(ctx.server())
        .await;
}

#[tokio::test]
async fn test_parallel_401s_share_one_refresh() {
    let ctx = TestContext::signed_in().await;
    mount_event_endpoint(&ctx).await;
    ctx.mock.mock_refresh(200, 1).await;

    let calls = (0..5).map(|_| ctx.services.events.get("e1"));
    let results: Vec<Result<Event, EventHubError>> = join_all(calls).await;

    for result in &results {
        let event = result.as_ref().expect("request should succeed after refresh");
        assert_eq!(event.id, "e1");
    }
    assert_eq!(ctx.store.access_token().as_deref(), Some(NEW_TOKEN));
    assert_eq!(ctx.navigator.calls(), 0);

    let refreshes = ctx
        .mock
        .received_paths()
        .await
        .into_iter()
        .filter(|p| p == "/api/auth/refresh")
        .count();
    assert_eq!(refreshes, 1);
    ctx.server().verify().await;
}

#[tokio::test]
async fn test_parallel_401s_from_spawned_tasks() {
    let ctx = TestContext::signed_in().await;
    mount_event_endpoint(&ctx).await;
    ctx.mock.mock_refresh(150, 1).await;

    let handles: Vec<_> = (0..5)
        .map(|_| {
            let events = ctx.services.events.clone();
            tokio::spawn(async move { events.get("e1").await })
        })
        .collect();

    for handle in handles {
        let event = handle.await.unwrap().unwrap();
        assert_eq!(event.title, "Spring Fest");
    }
    ctx.server().verify().await;
}

#[tokio::test]
async fn test_failed_refresh_clears_session_and_redirects_once() {
    let ctx = TestContext::signed_in().await;
    Mock::given(method("GET"))
        .and(path("/api/events/e1"))
        .respond_with(unauthorized())
        .mount(ctx.server())
        .await;
    ctx.mock.mock_refresh_failure(200).await;

    let calls = (0..5).map(|_| ctx.services.events.get("e1"));
    let results = join_all(calls).await;

    for result in results {
        assert_matches!(result, Err(EventHubError::SessionExpired));
    }
    assert_eq!(ctx.store.access_token(), None);
    assert!(ctx.store.user().is_none());
    assert_eq!(ctx.navigator.calls(), 1);
    assert_eq!(ctx.navigator.last_path().as_deref(), Some("/login"));
    ctx.server().verify().await;
}

#[tokio::test]
async fn test_late_401_after_failed_refresh_does_not_refresh_again() {
    let ctx = TestContext::signed_in().await;
    Mock::given(method("GET"))
        .and(path("/api/events/e1"))
        .respond_with(unauthorized())
        .mount(ctx.server())
        .await;
    Mock::given(method("GET"))
        .and(path("/api/events/e2"))
        .respond_with(unauthorized().set_delay(Duration::from_millis(400)))
        .mount(ctx.server())
        .await;
    ctx.mock.mock_refresh_failure(0).await;

    let (fast, slow) = futures::join!(ctx.services.events.get("e1"), ctx.services.events.get("e2"));

    assert_matches!(fast, Err(EventHubError::SessionExpired));
    assert_matches!(slow, Err(EventHubError::SessionExpired));
    assert_eq!(ctx.store.access_token(), None);
    assert_eq!(ctx.navigator.calls(), 1);

    let refreshes = ctx
        .mock
        .received_paths()
        .await
        .into_iter()
        .filter(|p| p == "/api/auth/refresh")
        .count();
    assert_eq!(refreshes, 1);
    ctx.server().verify().await;
}

#[tokio::test]
async fn test_retried_request_is_not_refreshed_again() {
    let ctx = TestContext::signed_in().await;
    Mock::given(method("GET"))
        .and(path("/api/events/e1"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(error_envelope("Not allowed")),
        )
        .expect(2)
        .mount(ctx.server())
        .await;
    ctx.mock.mock_refresh(0, 1).await;

    let result = ctx.services.events.get("e1").await;

    assert_matches!(result, Err(EventHubError::Api { status: 401, .. }));
    assert_eq!(ctx.store.access_token().as_deref(), Some(NEW_TOKEN));
    assert_eq!(ctx.navigator.calls(), 0);
    ctx.server().verify().await;
}

#[tokio::test]
async fn test_successful_request_never_refreshes() {
    let ctx = TestContext::signed_in().await;
    Mock::given(method("GET"))
        .and(path("/api/events/e1"))
        .and(header("authorization", format!("Bearer {}", OLD_TOKEN).as_str()))
        .respond_with(ok(event_json()))
        .mount(ctx.server())
        .await;
    ctx.mock.mock_refresh(0, 0).await;

    let event = ctx.services.events.get("e1").await.unwrap();

    assert_eq!(event.id, "e1");
    assert_eq!(ctx.store.access_token().as_deref(), Some(OLD_TOKEN));
    ctx.server().verify().await;
}

#[tokio::test]
async fn test_server_message_is_surfaced() {
    let ctx = TestContext::signed_in().await;
    Mock::given(method("GET"))
        .and(path("/api/events/e1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(error_envelope("Event not found")))
        .mount(ctx.server())
        .await;

    let err = ctx.services.events.get("e1").await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(eventhub::get_error_message(&err), "Event not found");
}
