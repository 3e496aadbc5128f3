//! Integration tests for the REST client.
//!
//! These tests run [`RestClient`] against a local mock server and verify the
//! request it sends (path, credentials, headers, body) and the normalized
//! outcome it returns.

use ansible_forms::clients::{HttpClient, RestClient, RestError};
use ansible_forms::rest::{ErrorKind, NormalizeError, NormalizerPolicy};
use ansible_forms::{ConnectionProfile, Hostname, Password, Username};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Base64 of `admin:secret`.
const BASIC_AUTH: &str = "Basic YWRtaW46c2VjcmV0";

fn create_test_profile() -> ConnectionProfile {
    ConnectionProfile::builder()
        .hostname(Hostname::new("forms.example.com").unwrap())
        .username(Username::new("admin").unwrap())
        .password(Password::new("secret").unwrap())
        .build()
        .unwrap()
}

fn create_client(base_uri: &str) -> RestClient {
    let http_client = HttpClient::new(&create_test_profile(), Some("provider-tests"))
        .unwrap()
        .with_base_uri(format!("{base_uri}/api"));
    RestClient::from_http_client(http_client, NormalizerPolicy::default())
}

// ============================================================================
// Request Building
// ============================================================================

#[tokio::test]
async fn test_get_sends_credentials_and_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/forms"))
        .and(header("Authorization", BASIC_AUTH))
        .and(header("Accept", "application/json"))
        .and(query_param("fields", "name"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "num_records": 2,
            "records": [{"name": "a"}, {"name": "b"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server.uri());
    let mut query = HashMap::new();
    query.insert("fields".to_string(), "name".to_string());

    let outcome = client.get("/forms", Some(query)).await.unwrap();

    assert!(outcome.is_ok());
    assert_eq!(outcome.status_code, 200);
    assert_eq!(outcome.response.record_count, 2);
    assert_eq!(outcome.response.records[1]["name"], "b");
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let mock_server = MockServer::start().await;
    let body = json!({"formName": "Demo", "extravars": {"region": "eu"}});

    Mock::given(method("POST"))
        .and(path("/api/job"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(body.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "message": "job launched",
            "data": {"output": {"id": 42}}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server.uri());
    let outcome = client.post("job", body, None).await.unwrap();

    assert!(outcome.is_ok());
    let record = outcome.response.first_record().unwrap();
    assert_eq!(record["data"]["output"]["id"], 42);
}

#[tokio::test]
async fn test_patch_and_delete_use_their_methods() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/job/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/job/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server.uri());

    let outcome = client
        .patch("job/42", json!({"status": "aborted"}), None)
        .await
        .unwrap();
    assert!(outcome.is_ok());

    let outcome = client.delete("job/42", None).await.unwrap();
    assert!(outcome.is_ok());
    assert_eq!(outcome.response.record_count, 0);
}

#[tokio::test]
async fn test_invalid_path_is_not_sent() {
    let mock_server = MockServer::start().await;
    let client = create_client(&mock_server.uri());

    let result = client.delete("///", None).await;

    assert!(matches!(result, Err(RestError::InvalidPath { .. })));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

// ============================================================================
// Response Normalization
// ============================================================================

#[tokio::test]
async fn test_show_endpoint_is_promoted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/job/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42,
            "status": "success",
            "form": "Demo"
        })))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server.uri());
    let outcome = client.get("job/42", None).await.unwrap();

    assert_eq!(outcome.response.record_count, 1);
    assert_eq!(outcome.response.records[0]["status"], "success");
}

#[tokio::test]
async fn test_api_error_is_classified() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/forms/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"code": "4", "message": "form not found", "target": "name"}
        })))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server.uri());
    let outcome = client.get("forms/missing", None).await.unwrap();

    assert_eq!(outcome.error_kind(), ErrorKind::ApiError);
    assert!(matches!(
        outcome.error,
        Some(NormalizeError::Api { ref code, status_code: 404, .. }) if code == "4"
    ));
}

#[tokio::test]
async fn test_status_code_error_is_classified() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/forms"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server.uri());
    let outcome = client.get("forms", None).await.unwrap();

    assert_eq!(outcome.error_kind(), ErrorKind::StatusCodeError);
    assert_eq!(outcome.status_code, 503);
}

#[tokio::test]
async fn test_html_error_page_is_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/forms"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server.uri());
    let outcome = client.get("forms", None).await.unwrap();

    assert_eq!(outcome.error_kind(), ErrorKind::MalformedBody);
    assert_eq!(outcome.status_code, 502);
}

#[tokio::test]
async fn test_connection_refused_is_transport_failure() {
    // Reserve a port, then free it so nothing is listening there
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = create_client(&format!("http://127.0.0.1:{port}"));
    let outcome = client.get("forms", None).await.unwrap();

    assert_eq!(outcome.error_kind(), ErrorKind::TransportFailure);
    assert_eq!(outcome.status_code, 0);
    assert!(!outcome.response.transport_error.is_empty());
    assert!(matches!(outcome.error, Some(NormalizeError::Transport(_))));
}

// ============================================================================
// Zero Or One Record
// ============================================================================

#[tokio::test]
async fn test_get_zero_or_one_record() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/forms/none"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"num_records": 0, "records": []})),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/forms/one"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"name": "one", "categories": []})),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/forms/many"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": [{"name": "a"}, {"name": "b"}]
        })))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server.uri());

    assert!(client
        .get_zero_or_one_record("forms/none", None)
        .await
        .unwrap()
        .is_none());

    let record = client
        .get_zero_or_one_record("forms/one", None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record["name"], "one");

    let result = client.get_zero_or_one_record("/forms/many", None).await;
    assert!(matches!(
        result,
        Err(RestError::UnexpectedRecordCount { ref path, count: 2 }) if path == "forms/many"
    ));
}

#[tokio::test]
async fn test_get_zero_or_one_record_surfaces_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/forms/broken"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server.uri());
    let result = client.get_zero_or_one_record("forms/broken", None).await;

    assert!(matches!(
        result,
        Err(RestError::Response(NormalizeError::StatusCode { status_code: 500 }))
    ));
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test]
async fn test_concurrent_requests_respect_the_profile_limit() {
    const REQUESTS: u32 = 3;
    let delay = Duration::from_millis(200);
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/forms"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"records": [{"name": "a"}]}))
                .set_delay(delay),
        )
        .expect(u64::from(REQUESTS))
        .mount(&mock_server)
        .await;

    let profile = ConnectionProfile::builder()
        .hostname(Hostname::new("forms.example.com").unwrap())
        .username(Username::new("admin").unwrap())
        .password(Password::new("secret").unwrap())
        .max_concurrent_requests(1)
        .build()
        .unwrap();
    let http_client = HttpClient::new(&profile, None)
        .unwrap()
        .with_base_uri(format!("{}/api", mock_server.uri()));
    let client = Arc::new(RestClient::from_http_client(
        http_client,
        NormalizerPolicy::default(),
    ));

    let started = Instant::now();
    let handles: Vec<_> = (0..REQUESTS)
        .map(|_| {
            let client = Arc::clone(&client);
            tokio::spawn(async move { client.get("forms", None).await })
        })
        .collect();

    for handle in handles {
        let outcome = handle.await.unwrap().unwrap();
        assert_eq!(outcome.response.record_count, 1);
    }

    // One request at a time, so the delays add up.
    assert!(started.elapsed() >= delay * REQUESTS);
}
