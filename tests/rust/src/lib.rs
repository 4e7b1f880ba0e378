//! Shared test utilities and fixtures for Spacecounter integration tests.

pub use spacecounter_core::{DomainEvent, RoutePath, Space, SpaceId, SpaceOrigin, SyncConfig};

pub use mocks::{MockSpaceRepository, SpaceCall};

/// Fake space server built on wiremock
pub mod server {
    use serde_json::json;
    use spacecounter_core::SyncConfig;
    use std::time::Duration;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub const NAMESPACE: &str = "replicache";

    /// A running fake of the space server
    pub struct SpaceServer {
        pub mock: MockServer,
    }

    impl SpaceServer {
        pub async fn start() -> Self {
            Self {
                mock: MockServer::start().await,
            }
        }

        pub fn uri(&self) -> String {
            self.mock.uri()
        }

        /// Config pointing at this server with a short poke retry
        pub fn config(&self) -> SyncConfig {
            SyncConfig::new(&self.uri())
                .expect("mock server URI is valid")
                .with_poke_retry(Duration::from_millis(25))
        }

        fn api_path(operation: &str) -> String {
            format!("/api/{}/{}", NAMESPACE, operation)
        }

        /// `spaceExists` for `id` answers `exists`, expected `times` times
        pub async fn expect_space_exists(&self, id: &str, exists: bool, times: u64) {
            Mock::given(method("POST"))
                .and(path(Self::api_path("spaceExists")))
                .and(body_json(json!({ "spaceID": id })))
                .respond_with(
                    ResponseTemplate::new(200).set_body_json(json!({ "spaceExists": exists })),
                )
                .expect(times)
                .mount(&self.mock)
                .await;
        }

        /// `createSpace` hands out `new_id`, expected `times` times
        pub async fn expect_create_space(&self, new_id: &str, times: u64) {
            Mock::given(method("POST"))
                .and(path(Self::api_path("createSpace")))
                .and(body_json(json!({})))
                .respond_with(
                    ResponseTemplate::new(200).set_body_json(json!({ "spaceID": new_id })),
                )
                .expect(times)
                .mount(&self.mock)
                .await;
        }

        /// Event stream for `space_id` that sends one poke per connection
        pub async fn serve_pokes(&self, space_id: &str) {
            Mock::given(method("GET"))
                .and(path(Self::api_path("poke")))
                .and(wiremock::matchers::query_param("spaceID", space_id))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_raw("data: poke\n\n", "text/event-stream"),
                )
                .mount(&self.mock)
                .await;
        }

        /// Number of requests received for an operation
        pub async fn request_count(&self, operation: &str) -> usize {
            let wanted = Self::api_path(operation);
            self.mock
                .received_requests()
                .await
                .unwrap_or_default()
                .iter()
                .filter(|r| r.url.path() == wanted)
                .count()
        }
    }
}

/// Event testing utilities
pub mod events {
    use spacecounter_core::{DomainEvent, EventReceiver};
    use std::time::Duration;

    /// Collect events until `timeout` passes without a new one
    pub async fn collect_events(rx: &mut EventReceiver, timeout: Duration) -> Vec<DomainEvent> {
        let mut events = Vec::new();
        while let Ok(Some(event)) = tokio::time::timeout(timeout, rx.recv()).await {
            events.push(event);
        }
        events
    }

    /// Wait for the first event matching `predicate`
    pub async fn wait_for_event<F>(
        rx: &mut EventReceiver,
        timeout: Duration,
        predicate: F,
    ) -> Option<DomainEvent>
    where
        F: Fn(&DomainEvent) -> bool,
    {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            if remaining.is_zero() {
                return None;
            }
            match tokio::time::timeout(remaining, rx.recv()).await {
                Ok(Some(event)) if predicate(&event) => return Some(event),
                Ok(Some(_)) => continue,
                Ok(None) | Err(_) => return None,
            }
        }
    }
}

/// Async test helpers
pub mod async_helpers {
    use std::time::Duration;

    /// Default test timeout (5 seconds)
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Poll `condition` every 10ms until it holds or `timeout` passes
    pub async fn eventually<F>(timeout: Duration, condition: F) -> bool
    where
        F: Fn() -> bool,
    {
        let deadline = tokio::time::Instant::now() + timeout;
        while tokio::time::Instant::now() < deadline {
            if condition() {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        condition()
    }
}

/// Install a test subscriber honoring RUST_LOG (idempotent)
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
