//! Tests for the HTTP client module

use super::*;
use crate::error::Error;
use std::time::{Duration, Instant};
use wiremock::matchers::{body_string, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(max_connections: usize) -> HttpClient {
    let config = HttpClientConfig::builder()
        .timeout(Duration::from_secs(5))
        .max_connections(max_connections)
        .build();
    HttpClient::with_config(config).unwrap()
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(90));
    assert_eq!(config.max_connections, 10);
    assert!(config.default_headers.is_empty());
    assert!(config.user_agent.starts_with("tradedata-scraper/"));
}

#[test]
fn test_http_client_config_builder() {
    let mut extra = crate::types::StringMap::new();
    extra.insert("Origin".to_string(), "https://example.com".to_string());

    let config = HttpClientConfig::builder()
        .timeout(Duration::from_secs(30))
        .max_connections(4)
        .header("X-Requested-With", "XMLHttpRequest")
        .headers(&extra)
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.max_connections, 4);
    assert_eq!(
        config.default_headers.get("X-Requested-With"),
        Some(&"XMLHttpRequest".to_string())
    );
    assert_eq!(
        config.default_headers.get("Origin"),
        Some(&"https://example.com".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test]
fn test_http_client_rejects_zero_connections() {
    let config = HttpClientConfig::builder().max_connections(0).build();
    let err = HttpClient::with_config(config).unwrap_err();
    assert!(matches!(err, Error::InvalidConfigValue { .. }));
}

#[tokio::test]
async fn test_post_form_encodes_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("selectPaging=2&cntyNm=Algeria%2CAustralia"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [{"total": 1}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(2);
    let form = vec![
        ("selectPaging".to_string(), "2".to_string()),
        ("cntyNm".to_string(), "Algeria,Australia".to_string()),
    ];

    let body = client
        .post_form(&format!("{}/search", mock_server.uri()), &form)
        .await
        .unwrap();

    assert_eq!(body["items"][0]["total"], 1);
}

#[tokio::test]
async fn test_post_form_default_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header("X-Requested-With", "XMLHttpRequest"))
        .and(header("isAjax", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .header("X-Requested-With", "XMLHttpRequest")
        .header("isAjax", "true")
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let form: Vec<(String, String)> = Vec::new();
    let body = client.post_form(&mock_server.uri(), &form).await.unwrap();
    assert!(body.as_object().unwrap().is_empty());
}

#[tokio::test]
async fn test_post_form_status_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service unavailable"))
        .mount(&mock_server)
        .await;

    let client = test_client(1);
    let form = [("selectPaging", "1")];
    let err = client.post_form(&mock_server.uri(), &form).await.unwrap_err();

    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "Service unavailable");
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_post_form_invalid_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("selectPaging=1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let client = test_client(1);
    let form = [("selectPaging", "1")];
    let err = client.post_form(&mock_server.uri(), &form).await.unwrap_err();

    assert!(matches!(err, Error::Decode { .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_post_form_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .timeout(Duration::from_millis(100))
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let form = [("selectPaging", "1")];
    let err = client.post_form(&mock_server.uri(), &form).await.unwrap_err();

    assert!(matches!(err, Error::Timeout { timeout_ms: 100 }));
}

#[tokio::test]
async fn test_connection_cap_limits_in_flight_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({}))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(4)
        .mount(&mock_server)
        .await;

    let client = test_client(2);
    let uri = mock_server.uri();
    let form = [("selectPaging", "1")];

    let start = Instant::now();
    let results =
        futures::future::join_all((0..4).map(|_| client.post_form(&uri, &form))).await;

    assert!(results.iter().all(Result::is_ok));
    // Two waves of two requests each
    assert!(start.elapsed() >= Duration::from_millis(400));
    assert_eq!(client.available_connections(), 2);
}

#[test]
fn test_http_client_debug() {
    let client = HttpClient::new().unwrap();
    let debug_str = format!("{client:?}");
    assert!(debug_str.contains("HttpClient"));
    assert!(debug_str.contains("config"));
}
