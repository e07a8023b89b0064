use serde_json::json;
use slice_sync::auth::PrismicAuthenticator;
use slice_sync::client::CustomTypesClient;
use slice_sync_core::contract::{AuthToken, Authenticator, ModelRepository, ModelSet};
use slice_sync_core::diff::build_transaction;
use slice_sync_core::error::SyncError;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_client(server: &MockServer) -> CustomTypesClient {
    CustomTypesClient::new(reqwest::Client::new(), server.uri(), "demo")
}

#[tokio::test]
async fn login_posts_json_credentials_and_returns_body_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "email": "dev@example.com", "password": "pw" })))
        .respond_with(ResponseTemplate::new(200).set_body_string("eyJhbGciOi.session"))
        .expect(1)
        .mount(&server)
        .await;

    let auth = PrismicAuthenticator::new(reqwest::Client::new(), format!("{}/login", server.uri()));
    let token = auth.login("dev@example.com", "pw").await.unwrap();

    assert_eq!(token.as_str(), "eyJhbGciOi.session");
}

#[tokio::test]
async fn login_rejection_is_a_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
        .mount(&server)
        .await;

    let auth = PrismicAuthenticator::new(reqwest::Client::new(), format!("{}/login", server.uri()));
    let err = auth.login("dev@example.com", "wrong").await.unwrap_err();

    assert!(matches!(err, SyncError::Transport { operation: "login", .. }));
}

#[tokio::test]
async fn list_calls_send_repository_agent_and_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/customtypes"))
        .and(header("repository", "demo"))
        .and(header("user-agent", "sm-api"))
        .and(header("authorization", "Bearer session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "page", "label": "Page", "repeatable": true, "json": {} }
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/slices"))
        .and(header("repository", "demo"))
        .and(header("user-agent", "sm-api"))
        .and(header("authorization", "Bearer session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "hero", "type": "SharedSlice", "name": "Hero", "variations": [] },
            { "id": "quote", "type": "SharedSlice", "name": "Quote", "variations": [] }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = api_client(&server);
    let token = AuthToken::new("session");

    let custom_types = client.list_custom_types(&token).await.unwrap();
    let slices = client.list_shared_slices(&token).await.unwrap();

    assert_eq!(custom_types.len(), 1);
    assert_eq!(custom_types[0].id, "page");
    let ids: Vec<&str> = slices.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["hero", "quote"]);
}

#[tokio::test]
async fn server_error_on_list_is_a_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slices"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let err = api_client(&server)
        .list_shared_slices(&AuthToken::new("t"))
        .await
        .unwrap_err();

    match err {
        SyncError::Transport { operation, source } => {
            assert_eq!(operation, "list shared slices");
            assert!(source.to_string().contains("upstream down"));
        }
        other => panic!("expected Transport, got {other:?}"),
    }
}

#[tokio::test]
async fn error_status_without_body_still_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bulk"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = api_client(&server)
        .apply_bulk(&AuthToken::new("t"), &build_transaction(&ModelSet::default(), &ModelSet::default()))
        .await
        .unwrap_err();

    match err {
        SyncError::Transport { operation, source } => {
            assert_eq!(operation, "bulk");
            assert!(source.to_string().starts_with("status 503"));
        }
        other => panic!("expected Transport, got {other:?}"),
    }
}

#[tokio::test]
async fn unexpected_list_body_is_a_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/customtypes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "not": "a list" })))
        .mount(&server)
        .await;

    let err = api_client(&server)
        .list_custom_types(&AuthToken::new("t"))
        .await
        .unwrap_err();
    assert!(matches!(err, SyncError::Transport { .. }));
}

#[tokio::test]
async fn bulk_posts_the_transaction_once() {
    let server = MockServer::start().await;
    let desired: ModelSet = ModelSet::new(
        vec![serde_json::from_value(json!({ "id": "page", "label": "Page" })).unwrap()],
        vec![],
    );
    let transaction = build_transaction(&ModelSet::default(), &desired);

    Mock::given(method("POST"))
        .and(path("/bulk"))
        .and(header("repository", "demo"))
        .and(header("authorization", "Bearer session"))
        .and(body_json(json!({
            "changes": [{
                "type": "CUSTOM_TYPE",
                "id": "page",
                "operation": "insert",
                "payload": { "id": "page", "label": "Page" }
            }]
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    api_client(&server)
        .apply_bulk(&AuthToken::new("session"), &transaction)
        .await
        .unwrap();
}

#[tokio::test]
async fn trailing_slash_in_base_url_is_tolerated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/customtypes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = CustomTypesClient::new(
        reqwest::Client::new(),
        format!("{}/", server.uri()),
        "demo",
    );
    assert!(client
        .list_custom_types(&AuthToken::new("t"))
        .await
        .unwrap()
        .is_empty());
}
