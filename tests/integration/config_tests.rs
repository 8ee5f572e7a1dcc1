use serde_json::json;
use source_indexer::config::load_config;
use source_indexer::SourceIndexer;
use std::io::Write;
use tempfile::NamedTempFile;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_config(base_url: &str, refresh_on_start: bool) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[service]
base-url = "{}"
connect-timeout-secs = 5

[indexer]
refresh-on-start = {}

[logging]
level = "debug"
"#,
        base_url, refresh_on_start
    )
    .unwrap();
    file.flush().unwrap();
    file
}

#[tokio::test]
async fn test_from_config_refreshes_on_start() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/rag/indexed-urls"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"urls": ["https://a.com"]})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let file = write_config(&mock_server.uri(), true);
    let config = load_config(file.path()).unwrap();
    let indexer = SourceIndexer::from_config(&config).await.unwrap();

    assert!(indexer.is_indexed("https://a.com"));
}

#[tokio::test]
async fn test_from_config_survives_failed_refresh() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/rag/indexed-urls"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let file = write_config(&mock_server.uri(), true);
    let config = load_config(file.path()).unwrap();
    let indexer = SourceIndexer::from_config(&config).await.unwrap();

    assert_eq!(indexer.tracker().indexed_count(), 0);
}

#[tokio::test]
async fn test_from_config_without_refresh() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let file = write_config(&mock_server.uri(), false);
    let config = load_config(file.path()).unwrap();
    let indexer = SourceIndexer::from_config(&config).await.unwrap();

    assert_eq!(indexer.tracker().indexed_count(), 0);
}
