//! Unit tests for the gorest_client crate.

use super::*; // Import items from lib.rs
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// --- Test Constants ---
const TEST_TOKEN: &str = "test-token";

fn sample_user_body(id: u64, email: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": "Test User",
        "email": email,
        "gender": "male",
        "status": "active"
    })
}

fn test_client(base_url: &str) -> UserClient {
    let config = ClientConfig::new(base_url, TEST_TOKEN).unwrap();
    create_client(&config).unwrap()
}

#[tokio::test]
async fn test_default_headers_are_present_exactly_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/public/v2/users"))
        .and(header("accept", "application/json"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    client.list_users().await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let headers = &requests[0].headers;
    assert_eq!(headers.get_all("accept").iter().count(), 1);
    assert_eq!(headers.get_all("authorization").iter().count(), 1);
}

#[tokio::test]
async fn test_list_users_decodes_user_array() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/public/v2/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            sample_user_body(1, "a@example.com"),
            sample_user_body(2, "b@example.com"),
        ])))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let users = client.list_users().await.unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!(users[0].id, 1);
    assert_eq!(users[1].email, "b@example.com");
}

#[tokio::test]
async fn test_list_users_unexpected_status_carries_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/public/v2/users"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let error = client.list_users().await.unwrap_err();

    match error {
        Error::UnexpectedStatus {
            expected,
            actual,
            body,
        } => {
            assert_eq!(expected, StatusCode::OK);
            assert_eq!(actual, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body, "boom");
        }
        other => panic!("Expected UnexpectedStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn test_create_user_submits_payload_and_decodes_response() {
    let mock_server = MockServer::start().await;
    let email = "test.user.unique@example.com";

    Mock::given(method("POST"))
        .and(path("/public/v2/users"))
        .and(body_partial_json(json!({
            "name": "Test User",
            "email": email,
            "gender": "male",
            "status": "active"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(sample_user_body(42, email)))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let payload = NewUser {
        name: "Test User".to_string(),
        email: email.to_string(),
        gender: Gender::Male,
        status: UserStatus::Active,
    };
    let created = client.create_user(&payload).await.unwrap();

    assert_eq!(created.id, 42);
    assert_eq!(created.email, email);
}

#[tokio::test]
async fn test_create_user_maps_validation_rejection_to_unexpected_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/public/v2/users"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!([
            { "field": "email", "message": "has already been taken" }
        ])))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let payload = NewUser {
        name: "Test User".to_string(),
        email: "taken@example.com".to_string(),
        gender: Gender::Female,
        status: UserStatus::Active,
    };
    let error = client.create_user(&payload).await.unwrap_err();

    match error {
        Error::UnexpectedStatus {
            expected,
            actual,
            body,
        } => {
            assert_eq!(expected, StatusCode::CREATED);
            assert_eq!(actual, StatusCode::UNPROCESSABLE_ENTITY);
            assert!(body.contains("has already been taken"));
        }
        other => panic!("Expected UnexpectedStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn test_get_user_decodes_single_user() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/public/v2/users/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_user_body(42, "a@example.com")))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let user = client.get_user(42).await.unwrap();

    assert_eq!(user.id, 42);
}

#[tokio::test]
async fn test_get_user_maps_404_to_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/public/v2/users/42"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "Resource not found" })),
        )
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let error = client.get_user(42).await.unwrap_err();

    assert!(matches!(error, Error::NotFound));
}

#[tokio::test]
async fn test_get_user_reports_schema_mismatch_with_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/public/v2/users/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "unexpected": true })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let error = client.get_user(42).await.unwrap_err();

    match error {
        Error::Decode { body, .. } => assert!(body.contains("unexpected")),
        other => panic!("Expected Decode, got {:?}", other),
    }
}

#[tokio::test]
async fn test_update_user_patches_and_decodes_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/public/v2/users/42"))
        .and(body_partial_json(json!({ "name": "Updated Name" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42,
            "name": "Updated Name",
            "email": "a@example.com",
            "gender": "male",
            "status": "active"
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let updated = client
        .update_user(42, &UserUpdate::rename("Updated Name"))
        .await
        .unwrap();

    assert_eq!(updated.id, 42);
    assert_eq!(updated.name, "Updated Name");
}

#[tokio::test]
async fn test_update_user_maps_404_to_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/public/v2/users/42"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Resource not found" })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let error = client
        .update_user(42, &UserUpdate::rename("Updated Name"))
        .await
        .unwrap_err();

    assert!(matches!(error, Error::NotFound));
}

#[tokio::test]
async fn test_delete_user_accepts_no_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/public/v2/users/42"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    client.delete_user(42).await.unwrap();
}

#[tokio::test]
async fn test_delete_user_maps_404_to_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/public/v2/users/42"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let error = client.delete_user(42).await.unwrap_err();

    assert!(matches!(error, Error::NotFound));
}

#[tokio::test]
async fn test_relative_paths_resolve_under_base_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/public/v2/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    // Base URL with a path segment and no trailing slash.
    let client = test_client(&format!("{}/api", mock_server.uri()));
    let users = client.list_users().await.unwrap();

    assert!(users.is_empty());
}

#[tokio::test]
async fn test_create_client_rejects_token_with_invalid_header_characters() {
    let config = ClientConfig::new("https://example.com/", "bad\ntoken").unwrap();

    let error = create_client(&config).unwrap_err();
    assert!(matches!(error, Error::Configuration(_)));
}

#[tokio::test]
async fn test_transport_failure_surfaces_as_transport_error() {
    // Reserved TLD, guaranteed to fail resolution.
    let client = test_client("http://gorest.invalid/");

    let error = client.list_users().await.unwrap_err();
    assert!(matches!(error, Error::Transport(_)));
}
