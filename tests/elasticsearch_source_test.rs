//! Integration tests for the Elasticsearch source against a mock server

use embark::adapters::elasticsearch::models::{reachable_documents, MAX_RESULT_WINDOW};
use embark::adapters::elasticsearch::ElasticsearchSource;
use embark::adapters::traits::SourceReader;
use embark::config::ElasticsearchConfig;
use embark::domain::FetchError;
use mockito::{Matcher, Server};
use serde_json::json;

// base64("elastic:changeme")
const BASIC_AUTH: &str = "Basic ZWxhc3RpYzpjaGFuZ2VtZQ==";

fn config(base_url: &str) -> ElasticsearchConfig {
    toml::from_str(&format!(
        r#"
        base_url = "{base_url}"
        index = "documents"
        username = "elastic"
        password = "changeme"
        timeout_seconds = 5
        "#
    ))
    .unwrap()
}

#[tokio::test]
async fn test_fetch_page_sends_paged_match_all_query() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/documents/_search")
        .match_header("authorization", BASIC_AUTH)
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "size": 2,
            "from": 4,
            "track_total_hits": true,
            "_source": ["id", "text"],
            "query": { "match_all": {} }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "took": 1,
                "timed_out": false,
                "hits": {
                    "total": { "value": 6, "relation": "eq" },
                    "hits": [
                        { "_id": "a", "_source": { "id": 5, "text": "five" } },
                        { "_id": "b", "_source": { "id": 6, "text": "six" } }
                    ]
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let source = ElasticsearchSource::new(&config(&server.url())).unwrap();
    let page = source.fetch_page(4, 2).await.unwrap();

    mock.assert_async().await;
    assert_eq!(page.total_count, 6);
    assert_eq!(page.len(), 2);
    assert_eq!(page.records[0]["id"], json!(5));
    assert_eq!(page.records[1]["text"], json!("six"));
}

#[tokio::test]
async fn test_fetch_page_uses_configured_field_names() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/documents/_search")
        .match_body(Matcher::PartialJson(json!({
            "_source": ["doc_id", "body"]
        })))
        .with_status(200)
        .with_body(r#"{"hits": {"total": {"value": 0}, "hits": []}}"#)
        .create_async()
        .await;

    let mut config = config(&server.url());
    config.id_field = "doc_id".to_string();
    config.text_field = "body".to_string();

    let page = ElasticsearchSource::new(&config)
        .unwrap()
        .fetch_page(0, 10)
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(page.is_empty());
}

#[tokio::test]
async fn test_fetch_page_accepts_legacy_total_and_missing_source() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/documents/_search")
        .with_status(200)
        .with_body(r#"{"hits": {"total": 3, "hits": [{"_id": "x"}]}}"#)
        .create_async()
        .await;

    let source = ElasticsearchSource::new(&config(&server.url())).unwrap();
    let page = source.fetch_page(0, 10).await.unwrap();

    assert_eq!(page.total_count, 3);
    assert_eq!(page.len(), 1);
    assert!(page.records[0].is_empty());
}

#[tokio::test]
async fn test_fetch_page_non_success_status() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/documents/_search")
        .with_status(401)
        .with_body("missing authentication credentials")
        .create_async()
        .await;

    let source = ElasticsearchSource::new(&config(&server.url())).unwrap();
    let err = source.fetch_page(0, 10).await.unwrap_err();

    match err {
        FetchError::Status { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("credentials"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_page_invalid_json() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/documents/_search")
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let source = ElasticsearchSource::new(&config(&server.url())).unwrap();
    let err = source.fetch_page(0, 10).await.unwrap_err();

    assert!(matches!(err, FetchError::Decode(_)));
}

#[tokio::test]
async fn test_fetch_page_connection_refused() {
    // Port 9 (discard) is not expected to be listening
    let source = ElasticsearchSource::new(&config("http://127.0.0.1:9")).unwrap();
    let err = source.fetch_page(0, 10).await.unwrap_err();

    assert!(matches!(err, FetchError::Transport(_)));
    assert_eq!(err.status_code(), None);
}

#[tokio::test]
async fn test_zero_size_page_reports_total() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/documents/_search")
        .match_body(Matcher::PartialJson(json!({ "size": 0, "from": 0 })))
        .with_status(200)
        .with_body(r#"{"hits": {"total": {"value": 12345}, "hits": []}}"#)
        .create_async()
        .await;

    let source = ElasticsearchSource::new(&config(&server.url())).unwrap();
    let page = source.fetch_page(0, 0).await.unwrap();

    mock.assert_async().await;
    assert_eq!(page.total_count, 12345);
}

#[tokio::test]
async fn test_total_beyond_result_window_still_returns_page() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/documents/_search")
        .with_status(200)
        .with_body(
            r#"{"hits": {"total": {"value": 250000}, "hits": [{"_source": {"id": 1, "text": "a"}}]}}"#,
        )
        .create_async()
        .await;

    let source = ElasticsearchSource::new(&config(&server.url())).unwrap();
    let page = source.fetch_page(0, 1).await.unwrap();

    assert_eq!(page.total_count, 250_000);
    assert_eq!(reachable_documents(page.total_count), MAX_RESULT_WINDOW);
    assert_eq!(page.len(), 1);
}
