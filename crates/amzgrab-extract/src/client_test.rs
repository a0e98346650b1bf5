use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

fn client_for(server: &MockServer, max_retries: u32) -> ProxyClient {
    ProxyClient::new(5, max_retries, 0)
        .unwrap()
        .with_endpoints(
            &format!("{}/v1/", server.uri()),
            &format!("{}/headers", server.uri()),
            "us",
        )
}

#[tokio::test]
async fn fetch_markup_returns_the_response_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/"))
        .and(query_param("url", "https://www.amazon.com/dp/B08N5WRWNW"))
        .and(query_param("country", "us"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>page</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server, 0);
    let body = client
        .fetch_markup("https://www.amazon.com/dp/B08N5WRWNW", "test-key")
        .await
        .unwrap();
    assert_eq!(body, "<html>page</html>");
}

#[tokio::test]
async fn fetch_markup_maps_unexpected_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = client_for(&server, 0);
    let err = client
        .fetch_markup("https://www.amazon.com/dp/B08N5WRWNW", "test-key")
        .await
        .unwrap_err();
    assert!(
        matches!(err, ScrapeError::UnexpectedStatus { status: 502, .. }),
        "expected UnexpectedStatus, got: {err:?}"
    );
}

#[tokio::test]
async fn fetch_markup_maps_429_to_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
        .mount(&server)
        .await;

    let client = client_for(&server, 0);
    let err = client
        .fetch_markup("https://www.amazon.com/dp/B08N5WRWNW", "test-key")
        .await
        .unwrap_err();
    assert!(
        matches!(err, ScrapeError::RateLimited { retry_after_secs: 7 }),
        "expected RateLimited, got: {err:?}"
    );
}

#[tokio::test]
async fn fetch_markup_retries_transient_rate_limits() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>second try</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server, 1);
    let body = client
        .fetch_markup("https://www.amazon.com/dp/B08N5WRWNW", "test-key")
        .await
        .unwrap();
    assert_eq!(body, "<html>second try</html>");
}

#[tokio::test]
async fn resolve_user_agent_takes_the_first_service_entry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/headers"))
        .and(query_param("api_key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": ["Mozilla/5.0 First", "Mozilla/5.0 Second"]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, 0);
    assert_eq!(
        client.resolve_user_agent("test-key").await,
        "Mozilla/5.0 First"
    );
}

#[tokio::test]
async fn resolve_user_agent_reads_browser_header_objects() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/headers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": [{"user-agent": "Mozilla/5.0 FromHeaders", "accept-language": "en-US"}]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, 0);
    assert_eq!(
        client.resolve_user_agent("test-key").await,
        "Mozilla/5.0 FromHeaders"
    );
}

#[tokio::test]
async fn resolve_user_agent_falls_back_when_the_service_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/headers"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server, 0);
    assert_eq!(client.resolve_user_agent("test-key").await, FALLBACK_UA);
}

#[tokio::test]
async fn resolve_user_agent_falls_back_on_empty_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/headers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "result": [] })))
        .mount(&server)
        .await;

    let client = client_for(&server, 0);
    assert_eq!(client.resolve_user_agent("test-key").await, FALLBACK_UA);
}
