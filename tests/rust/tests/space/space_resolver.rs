//! Space resolution integration tests
//!
//! Runs SpaceResolverService against both the wiremock-backed HTTP client and
//! the recording MockSpaceRepository.

use pretty_assertions::assert_eq;
use spacecounter_client::HttpSpaceClient;
use spacecounter_core::{EventBus, RoutePath, SpaceOrigin, SpaceResolverService};
use std::sync::Arc;
use std::time::Duration;
use tests::events::collect_events;
use tests::mocks::{MockSpaceRepository, SpaceCall};
use tests::server::SpaceServer;
use tests::DomainEvent;

async fn resolve_http(server: &SpaceServer, path: &str) -> (String, Vec<String>) {
    let client = HttpSpaceClient::new(server.config()).unwrap();
    let resolver = SpaceResolverService::new(Arc::new(client));
    let mut routes = Vec::new();
    let space = resolver
        .resolve(&RoutePath::new(path), |r| routes.push(r.to_string()))
        .await
        .unwrap();
    (space.id.to_string(), routes)
}

#[tokio::test]
async fn existing_space_is_resumed_over_http() {
    let server = SpaceServer::start().await;
    server.expect_space_exists("xyz", true, 1).await;
    server.expect_create_space("unused", 0).await;

    let (id, routes) = resolve_http(&server, "/space/xyz").await;

    assert_eq!(id, "xyz");
    assert!(routes.is_empty());
    assert_eq!(server.request_count("createSpace").await, 0);
}

#[tokio::test]
async fn unknown_space_is_replaced_over_http() {
    let server = SpaceServer::start().await;
    server.expect_space_exists("xyz", false, 1).await;
    server.expect_create_space("new1", 1).await;

    let (id, routes) = resolve_http(&server, "/space/xyz").await;

    assert_eq!(id, "new1");
    assert_eq!(routes, vec!["/space/new1".to_string()]);
}

#[tokio::test]
async fn root_path_creates_without_exists_check() {
    let server = SpaceServer::start().await;
    server.expect_create_space("fresh", 1).await;

    let (id, routes) = resolve_http(&server, "/").await;

    assert_eq!(id, "fresh");
    assert_eq!(routes, vec!["/space/fresh".to_string()]);
    assert_eq!(server.request_count("spaceExists").await, 0);
}

#[tokio::test]
async fn non_space_paths_always_create() {
    for path in ["/foo", "/space", "/spaces/abc", "/foo/space/abc"] {
        let repo = Arc::new(MockSpaceRepository::new().with_space("abc").with_next_id("n"));
        let resolver = SpaceResolverService::new(repo.clone());
        let mut route_changes = 0;

        let space = resolver
            .resolve(&RoutePath::new(path), |_| route_changes += 1)
            .await
            .unwrap();

        assert_eq!(space.id.as_str(), "n", "path {}", path);
        assert_eq!(space.origin, SpaceOrigin::Created);
        assert_eq!(route_changes, 1, "path {}", path);
        assert_eq!(repo.calls(), vec![SpaceCall::Create], "path {}", path);
    }
}

#[tokio::test]
async fn query_string_and_trailing_segments_ignored() {
    let repo = Arc::new(MockSpaceRepository::new().with_space("abc"));
    let resolver = SpaceResolverService::new(repo.clone());

    let space = resolver
        .resolve(&RoutePath::new("/space/abc/details?tab=1"), |_| {
            panic!("no route change expected")
        })
        .await
        .unwrap();

    assert_eq!(space.id.as_str(), "abc");
    assert_eq!(repo.calls(), vec![SpaceCall::Exists("abc".to_string())]);
}

#[tokio::test]
async fn each_call_resolves_independently() {
    let repo = Arc::new(
        MockSpaceRepository::new()
            .with_next_id("first")
            .with_next_id("second"),
    );
    let resolver = SpaceResolverService::new(repo.clone());
    let stale = RoutePath::new("/space/stale");

    let a = resolver.resolve(&stale, |_| {}).await.unwrap();
    let b = resolver.resolve(&stale, |_| {}).await.unwrap();

    assert_eq!(a.id.as_str(), "first");
    assert_eq!(b.id.as_str(), "second");
    assert_eq!(repo.create_calls(), 2);
}

#[tokio::test]
async fn failures_propagate_without_route_change() {
    let repo = Arc::new(MockSpaceRepository::new().failing("connection refused"));
    let resolver = SpaceResolverService::new(repo.clone());

    let result = resolver
        .resolve(&RoutePath::new("/space/xyz"), |_| {
            panic!("route must not change on failure")
        })
        .await;

    let err = result.unwrap_err();
    assert!(err.to_string().contains("connection refused"));
    assert_eq!(repo.calls(), vec![SpaceCall::Exists("xyz".to_string())]);
}

#[tokio::test]
async fn resolution_emits_single_event() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe();
    let repo = Arc::new(MockSpaceRepository::new().with_next_id("new1"));
    let resolver = SpaceResolverService::new(repo).with_events(bus.sender());

    resolver.resolve(&RoutePath::new("/"), |_| {}).await.unwrap();

    let events = collect_events(&mut rx, Duration::from_millis(50)).await;
    assert_eq!(events.len(), 1);
    match &events[0] {
        DomainEvent::SpaceResolved { space_id, origin, .. } => {
            assert_eq!(space_id.as_str(), "new1");
            assert_eq!(*origin, SpaceOrigin::Created);
        }
        other => panic!("unexpected event: {:?}", other),
    }
}
