use crate::{create_indexer, trending};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_batch_composite_source_counts_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/rag/fetch-batch"))
        .and(body_partial_json(json!({
            "sources": [
                {"url": "https://a.com", "title": "T", "sourceType": "trending"},
                {"url": "https://b.com", "title": "T", "sourceType": "trending"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"url": "https://a.com", "status": "indexed"},
                {"url": "https://b.com", "status": "exists"}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let indexer = create_indexer(&mock_server);
    let results = indexer
        .index_sources_batch(&[trending("https://a.com and https://b.com", "T")])
        .await;

    assert_eq!(results.len(), 2);

    let progress = indexer.progress();
    assert_eq!(progress.total, 1);
    assert_eq!(progress.completed, 2);
    assert_eq!(progress.indexed, 1);
    assert_eq!(progress.already_indexed, 1);
    assert_eq!(progress.failed, 0);
    assert!(!progress.is_running);

    assert!(indexer.is_indexed("https://a.com"));
    assert!(indexer.is_indexed("https://b.com"));
}

#[tokio::test]
async fn test_batch_invalid_only_never_calls_service() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/rag/fetch-batch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let indexer = create_indexer(&mock_server);
    let results = indexer
        .index_sources_batch(&[trending("not a url", "Broken")])
        .await;

    assert_eq!(results.len(), 1);
    assert!(!results[0].success);
    assert!(results[0]
        .error
        .as_ref()
        .unwrap()
        .contains("No valid URLs found"));

    let progress = indexer.progress();
    assert_eq!(progress.total, 1);
    assert_eq!(progress.failed, 1);
    assert!(!progress.is_running);
}

#[tokio::test]
async fn test_batch_invalid_request_counted_as_failed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/rag/fetch-batch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"url": "https://a.com", "status": "indexed"},
                {"url": "https://c.com", "status": "failed", "error": "robots.txt disallows"}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let indexer = create_indexer(&mock_server);
    let results = indexer
        .index_sources_batch(&[
            trending("https://a.com", "A"),
            trending("not a url", "Broken"),
            trending("https://c.com", "C"),
        ])
        .await;

    assert_eq!(results.len(), 3);
    assert!(!results[0].success);
    assert!(results[1].success);
    assert_eq!(results[2].error.as_deref(), Some("robots.txt disallows"));

    let progress = indexer.progress();
    assert_eq!(progress.total, 3);
    assert_eq!(progress.completed, 2);
    assert_eq!(progress.indexed, 1);
    assert_eq!(progress.failed, 2);
    assert!(!indexer.is_indexed("https://c.com"));
}

#[tokio::test]
async fn test_batch_http_error_fails_every_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/rag/fetch-batch"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"error": "embedding quota exceeded"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let indexer = create_indexer(&mock_server);
    let results = indexer
        .index_sources_batch(&[
            trending("https://a.com and https://b.com", "Pair"),
            trending("https://c.com", "C"),
        ])
        .await;

    assert_eq!(results.len(), 3);
    for result in &results {
        assert!(!result.success);
        assert!(result
            .error
            .as_ref()
            .unwrap()
            .contains("embedding quota exceeded"));
    }

    let progress = indexer.progress();
    assert!(!progress.is_running);
    assert_eq!(progress.failed, 3);
    assert_eq!(indexer.tracker().indexed_count(), 0);
    assert_eq!(indexer.tracker().in_flight_count(), 0);
}

#[tokio::test]
async fn test_batch_cancel_stops_applying_service_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/rag/fetch-batch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"url": "https://a.com", "status": "indexed"},
                {"url": "https://b.com", "status": "indexed"},
                {"url": "https://c.com", "status": "indexed"}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let indexer = Arc::new(create_indexer(&mock_server));
    let mut progress = indexer.subscribe_progress();

    let watcher = {
        let indexer = indexer.clone();
        tokio::spawn(async move {
            while progress.changed().await.is_ok() {
                if progress.borrow().completed >= 1 {
                    indexer.cancel_batch();
                    break;
                }
            }
        })
    };

    let results = indexer
        .index_sources_batch(&[
            trending("https://a.com", "A"),
            trending("https://b.com", "B"),
            trending("https://c.com", "C"),
        ])
        .await;
    watcher.await.unwrap();

    // Every service result is still reported back to the caller
    assert_eq!(results.len(), 3);
    assert!(indexer.is_indexed("https://a.com"));
    assert!(!indexer.is_indexed("https://b.com"));
    assert!(!indexer.is_indexed("https://c.com"));

    let progress = indexer.progress();
    assert_eq!(progress.completed, 1);
    assert_eq!(progress.indexed, 1);
    assert!(!progress.is_running);
    assert_eq!(indexer.tracker().in_flight_count(), 0);
}
