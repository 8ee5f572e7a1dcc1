use crate::{create_indexer, trending};
use serde_json::json;
use source_indexer::ServiceError;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_single_source_indexed_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/rag/fetch-url"))
        .and(body_partial_json(json!({
            "url": "https://a.com/post",
            "title": "Post",
            "sourceType": "trending"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "wasAlreadyIndexed": false,
            "document": {"id": "doc-1", "url": "https://a.com/post"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let indexer = create_indexer(&mock_server);
    let request = trending("https://a.com/post", "Post");

    let first = indexer.index_source(&request).await;
    assert!(first.success);
    assert!(!first.was_already_indexed);
    assert_eq!(first.document, Some(json!({"id": "doc-1", "url": "https://a.com/post"})));

    // Second call is answered from the indexed set
    let second = indexer.index_source(&request).await;
    assert!(second.success);
    assert!(second.was_already_indexed);
}

#[tokio::test]
async fn test_single_source_partial_failure_over_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/rag/fetch-url"))
        .and(body_partial_json(json!({"url": "https://a.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"wasAlreadyIndexed": false})))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/rag/fetch-url"))
        .and(body_partial_json(json!({"url": "https://b.com"})))
        .respond_with(
            ResponseTemplate::new(502).set_body_json(json!({"error": "upstream fetch failed"})),
        )
        .mount(&mock_server)
        .await;

    let indexer = create_indexer(&mock_server);
    let result = indexer
        .index_source(&trending("https://a.com and https://b.com", "Pair"))
        .await;

    assert!(result.success);
    let warning = result.error.expect("partial failure should carry a warning");
    assert!(warning.contains("https://b.com"));
    assert!(warning.contains("502"));
    assert!(warning.contains("upstream fetch failed"));
    assert!(indexer.is_indexed("https://a.com"));
    assert!(!indexer.is_indexed("https://b.com"));
    assert!(!indexer.is_indexing("https://b.com"));
}

#[tokio::test]
async fn test_invalid_source_makes_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let indexer = create_indexer(&mock_server);
    let result = indexer.index_source(&trending("not a url", "Broken")).await;

    assert!(!result.success);
    assert!(result.error.unwrap().contains("No valid URLs found"));
}

#[tokio::test]
async fn test_refresh_replaces_indexed_set() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/rag/indexed-urls"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"urls": ["https://a.com", "https://b.com"]})),
        )
        .mount(&mock_server)
        .await;

    let indexer = create_indexer(&mock_server);
    assert_eq!(indexer.refresh().await.unwrap(), 2);
    assert!(indexer.is_indexed("https://a.com"));
    assert!(indexer.is_indexed("https://x.com and https://b.com"));
    assert!(!indexer.is_indexed("https://c.com"));
}

#[tokio::test]
async fn test_refresh_failure_keeps_stale_snapshot() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/rag/fetch-url"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"wasAlreadyIndexed": false})))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/rag/indexed-urls"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "database locked"})))
        .mount(&mock_server)
        .await;

    let indexer = create_indexer(&mock_server);
    indexer.index_source(&trending("https://a.com", "A")).await;

    let result = indexer.refresh().await;
    match result {
        Err(ServiceError::Status { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "database locked");
        }
        other => panic!("expected status error, got {:?}", other),
    }

    // Other operations continue against the stale snapshot
    assert!(indexer.is_indexed("https://a.com"));
}

#[tokio::test]
async fn test_undecodable_response_is_a_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/rag/fetch-url"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let indexer = create_indexer(&mock_server);
    let result = indexer.index_source(&trending("https://a.com", "A")).await;

    assert!(!result.success);
    assert!(result.error.unwrap().contains("Failed to decode"));
    assert!(!indexer.is_indexed("https://a.com"));
}
