//! Integration tests for the HTTP client.

use std::time::Duration;

use terra_select_net::NetworkError;
use terra_select_net::http::{HttpClient, HttpClientBuilder, HttpMethod, RequestBody};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_client_creation() {
    let client = HttpClient::new().expect("Failed to build client");
    assert_eq!(client.config().timeout, Some(Duration::from_secs(30)));
    assert_eq!(client.config().connect_timeout, Some(Duration::from_secs(10)));
    assert!(client.config().user_agent.starts_with("terra-select/"));
}

#[tokio::test]
async fn test_client_builder() {
    let client = HttpClientBuilder::new()
        .timeout(Duration::from_secs(60))
        .user_agent("field-app/1.0")
        .build()
        .expect("Failed to build client");

    assert_eq!(client.config().timeout, Some(Duration::from_secs(60)));
    assert_eq!(client.config().user_agent, "field-app/1.0");
}

#[tokio::test]
async fn test_invalid_header() {
    let result = HttpClient::builder().header("bad header", "value");
    assert!(matches!(result, Err(NetworkError::InvalidHeader(_))));
}

#[tokio::test]
async fn test_request_builder_chain() {
    let client = HttpClient::new().expect("Failed to build client");

    let request = client
        .post("https://example.com/api/recommend")
        .query("page", "1")
        .query("limit", "10")
        .timeout(Duration::from_secs(5))
        .build();

    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.url, "https://example.com/api/recommend");
    assert!(matches!(request.body, RequestBody::None));
    assert_eq!(request.query.len(), 2);
    assert_eq!(request.timeout, Some(Duration::from_secs(5)));
}

#[tokio::test]
async fn test_json_body() {
    let client = HttpClient::new().expect("Failed to build client");

    let request = client
        .post("https://example.com/api")
        .json(&serde_json::json!({"crop_type": "rice", "soil_ph": 6.5}))
        .build();

    assert!(matches!(request.body, RequestBody::Json(_)));
}

#[tokio::test]
async fn test_get_with_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/soils"))
        .and(query_param("q", "Kurnool"))
        .and(query_param("limit", "15"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpClient::new().expect("Failed to build client");
    let response = client
        .get(format!("{}/api/soils", mock_server.uri()))
        .query("q", "Kurnool")
        .query("limit", "15")
        .send()
        .await
        .expect("Request failed");

    assert_eq!(response.status(), 200);
    assert!(response.is_success());
    assert_eq!(response.text().await.expect("Failed to read body"), "ok");
}

#[tokio::test]
async fn test_post_json_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/recommend"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({"crop_type": "wheat"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"success": true})))
        .mount(&mock_server)
        .await;

    let client = HttpClient::new().expect("Failed to build client");
    let response = client
        .post(format!("{}/api/recommend", mock_server.uri()))
        .json(&serde_json::json!({"crop_type": "wheat"}))
        .send()
        .await
        .expect("Request failed");

    let data: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(data["success"], true);
}

#[tokio::test]
async fn test_malformed_json_is_json_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"success\": tru"))
        .mount(&mock_server)
        .await;

    let client = HttpClient::new().expect("Failed to build client");
    let response = client
        .get(format!("{}/broken", mock_server.uri()))
        .send()
        .await
        .expect("Request failed");

    let result = response.json::<serde_json::Value>().await;
    assert!(matches!(result, Err(NetworkError::Json(_))));
}

#[tokio::test]
async fn test_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let client = HttpClient::builder()
        .timeout(Duration::from_millis(100))
        .build()
        .expect("Failed to build client");

    let result = client.get(format!("{}/slow", mock_server.uri())).send().await;

    assert!(matches!(result, Err(NetworkError::Timeout)));
}

#[tokio::test]
async fn test_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/not-found"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&mock_server)
        .await;

    let client = HttpClient::new().expect("Failed to build client");
    let response = client
        .get(format!("{}/not-found", mock_server.uri()))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(response.status(), 404);
    assert!(!response.is_success());

    let err = response
        .ensure_success()
        .await
        .expect_err("404 must be an error");
    assert_eq!(
        err,
        NetworkError::HttpStatus {
            status: 404,
            message: Some("Not Found".to_string()),
        }
    );
}
