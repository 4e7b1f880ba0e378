//! HttpSpaceClient against a wiremock space server

use pretty_assertions::assert_eq;
use spacecounter_client::{HttpSpaceClient, SpaceApiError};
use spacecounter_core::{SpaceId, SpaceRepository};
use tests::server::SpaceServer;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn space_exists_true() {
    let server = SpaceServer::start().await;
    server.expect_space_exists("xyz", true, 1).await;

    let client = HttpSpaceClient::new(server.config()).unwrap();
    assert!(client.space_exists(&SpaceId::new("xyz")).await.unwrap());
}

#[tokio::test]
async fn space_exists_false() {
    let server = SpaceServer::start().await;
    server.expect_space_exists("gone", false, 1).await;

    let client = HttpSpaceClient::new(server.config()).unwrap();
    assert!(!client.space_exists(&SpaceId::new("gone")).await.unwrap());
}

#[tokio::test]
async fn create_space_returns_server_id() {
    let server = SpaceServer::start().await;
    server.expect_create_space("new1", 1).await;

    let client = HttpSpaceClient::new(server.config()).unwrap();
    assert_eq!(client.create_space().await.unwrap(), SpaceId::new("new1"));
}

#[tokio::test]
async fn custom_namespace_changes_paths() {
    let server = SpaceServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/counter/createSpace"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "spaceID": "c1" })),
        )
        .expect(1)
        .mount(&server.mock)
        .await;

    let client = HttpSpaceClient::new(server.config().with_namespace("counter")).unwrap();
    assert_eq!(client.create_space().await.unwrap().as_str(), "c1");
}

#[tokio::test]
async fn missing_field_is_decode_error() {
    let server = SpaceServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server.mock)
        .await;

    let client = HttpSpaceClient::new(server.config()).unwrap();
    let err = client.create_space().await.unwrap_err();
    assert!(matches!(err, SpaceApiError::Decode { .. }), "got {:?}", err);
}

#[tokio::test]
async fn repository_errors_propagate_through_anyhow() {
    let server = SpaceServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server.mock)
        .await;

    let client = HttpSpaceClient::new(server.config()).unwrap();
    let repo: &dyn SpaceRepository = &client;
    let err = repo.create().await.unwrap_err();

    let api_err = err.downcast_ref::<SpaceApiError>().expect("typed error preserved");
    assert!(matches!(api_err, SpaceApiError::Status { .. }));
    assert!(err.to_string().contains("createSpace"));
}
