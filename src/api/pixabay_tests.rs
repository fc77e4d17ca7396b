//! Tests for the Pixabay API client.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{PixabayClient, SearchResponse, DEFAULT_BASE_URL};
use crate::error::TrainerError;

/// Helper: a Pixabay response with `n` hits.
fn hits_json(n: usize) -> serde_json::Value {
    let hits: Vec<serde_json::Value> = (1..=n)
        .map(|i| {
            serde_json::json!({
                "id": i,
                "webformatURL": format!("https://cdn.example.com/{i}_640.jpg"),
                "previewURL": format!("https://cdn.example.com/{i}_150.jpg"),
                "tags": "cat, animal"
            })
        })
        .collect();
    serde_json::json!({ "total": n, "totalHits": n, "hits": hits })
}

fn client_for(server: &MockServer) -> PixabayClient {
    PixabayClient::with_base_url("test-key", format!("{}/api/", server.uri()))
}

// ── search_url ───────────────────────────────────────────────────────

#[test]
fn default_base_url() {
    let client = PixabayClient::new("key");
    assert_eq!(client.base_url(), DEFAULT_BASE_URL);
}

#[test]
fn search_url_encodes_word_without_lowercasing() {
    let client = PixabayClient::new("abc");
    let url = client.search_url("Кот Бегемот");

    assert!(url.starts_with("https://pixabay.com/api/?key=abc&q="));
    assert!(url.contains("q=%D0%9A%D0%BE%D1%82%20%D0%91"));
    assert!(url.contains("&image_type=photo"));
    assert!(url.contains("&per_page=4"));
    assert!(url.contains("&safesearch=true"));
    assert!(url.ends_with("&lang=ru"));
}

// ── response mapping ─────────────────────────────────────────────────

#[test]
fn image_pairs_map_webformat_and_preview() {
    let response: SearchResponse = serde_json::from_value(hits_json(2)).unwrap();
    let pairs = response.image_pairs();

    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0].high, "https://cdn.example.com/1_640.jpg");
    assert_eq!(pairs[0].low, "https://cdn.example.com/1_150.jpg");
    assert_eq!(pairs[1].high, "https://cdn.example.com/2_640.jpg");
}

#[test]
fn image_pairs_capped_at_four() {
    let response: SearchResponse = serde_json::from_value(hits_json(7)).unwrap();
    assert_eq!(response.image_pairs().len(), 4);
}

#[test]
fn missing_hits_field_is_empty() {
    let response: SearchResponse = serde_json::from_str("{}").unwrap();
    assert!(response.image_pairs().is_empty());
}

// ── search ───────────────────────────────────────────────────────────

#[tokio::test]
async fn search_sends_expected_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/"))
        .and(query_param("key", "test-key"))
        .and(query_param("q", "Кот"))
        .and(query_param("image_type", "photo"))
        .and(query_param("per_page", "4"))
        .and(query_param("safesearch", "true"))
        .and(query_param("lang", "ru"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hits_json(3)))
        .expect(1)
        .mount(&server)
        .await;

    let images = client_for(&server)
        .search("Кот", &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(images.len(), 3);
}

#[tokio::test]
async fn search_non_success_status_is_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .search("кот", &CancellationToken::new())
        .await;

    match result {
        Err(TrainerError::HttpStatus(status)) => assert_eq!(status.as_u16(), 429),
        other => panic!("Expected TrainerError::HttpStatus, got: {other:?}"),
    }
}

#[tokio::test]
async fn search_invalid_body_is_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .search("кот", &CancellationToken::new())
        .await;

    assert!(matches!(result, Err(TrainerError::Network(_))));
}

#[tokio::test]
async fn search_already_cancelled_returns_cancelled() {
    let server = MockServer::start().await;
    let token = CancellationToken::new();
    token.cancel();

    let result = client_for(&server).search("кот", &token).await;

    assert!(matches!(result, Err(TrainerError::Cancelled)));
}

#[tokio::test]
async fn search_cancelled_while_waiting() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(hits_json(1))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let token = CancellationToken::new();
    let canceller = token.clone();

    let (result, _) = tokio::join!(client.search("кот", &token), async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        canceller.cancel();
    });

    assert!(result.unwrap_err().is_cancelled());
}

#[tokio::test]
async fn search_unreachable_server_is_network_error() {
    let client = PixabayClient::with_base_url("key", "http://127.0.0.1:1/api/");
    let result = client.search("кот", &CancellationToken::new()).await;

    assert!(matches!(result, Err(TrainerError::Network(_))));
}
