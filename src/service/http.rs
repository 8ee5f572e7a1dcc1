//! HTTP implementation of the indexing service
//!
//! This module talks JSON to the newsletter backend's RAG endpoints:
//! - `POST api/rag/fetch-url` indexes one URL
//! - `POST api/rag/fetch-batch` indexes many URLs in one round trip
//! - `GET api/rag/indexed-urls` lists everything already stored
//!
//! No request timeout is set: a batch may legitimately take minutes while the
//! backend fetches and embeds every page. Only connecting is bounded.

use crate::config::ServiceConfig;
use crate::service::{BatchResponse, FetchOutcome, IndexingService, UrlSubmission};
use crate::{ServiceError, ServiceResult};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

const FETCH_URL_PATH: &str = "api/rag/fetch-url";
const FETCH_BATCH_PATH: &str = "api/rag/fetch-batch";
const INDEXED_URLS_PATH: &str = "api/rag/indexed-urls";

/// Builds an HTTP client for the indexing service
///
/// # Arguments
///
/// * `config` - The service configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &ServiceConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .build()
}

/// Indexing service backed by the newsletter backend's HTTP API
#[derive(Debug, Clone)]
pub struct HttpIndexingService {
    client: Client,
    base_url: Url,
}

#[derive(Serialize)]
struct BatchRequest<'a> {
    sources: &'a [UrlSubmission],
}

#[derive(Deserialize)]
struct IndexedUrlsResponse {
    #[serde(default)]
    urls: Vec<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl HttpIndexingService {
    /// Creates a service client from configuration
    pub fn new(config: &ServiceConfig) -> crate::Result<Self> {
        let client = build_http_client(config)?;
        Ok(Self::with_client(client, &config.base_url)?)
    }

    /// Creates a service client using an existing HTTP client
    ///
    /// The base URL is treated as a directory: endpoint paths are appended to
    /// it, so `http://host/backend` and `http://host/backend/` are equivalent.
    pub fn with_client(client: Client, base_url: &str) -> ServiceResult<Self> {
        let mut base_url =
            Url::parse(base_url).map_err(|e| ServiceError::InvalidBaseUrl(e.to_string()))?;

        if base_url.cannot_be_a_base() {
            return Err(ServiceError::InvalidBaseUrl(base_url.to_string()));
        }

        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { client, base_url })
    }

    /// Returns the base URL all endpoints are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> ServiceResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ServiceError::InvalidBaseUrl(e.to_string()))
    }
}

/// Decodes a JSON response, mapping non-2xx statuses to `ServiceError::Status`
async fn read_json<T: DeserializeOwned>(endpoint: &Url, response: Response) -> ServiceResult<T> {
    let status = response.status();
    let body = response.text().await.map_err(|source| ServiceError::Http {
        url: endpoint.to_string(),
        source,
    })?;

    if !status.is_success() {
        // Prefer the backend's {"error": "..."} message over the raw body
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.error)
            .unwrap_or(body);
        return Err(ServiceError::Status {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&body).map_err(|e| ServiceError::Decode {
        url: endpoint.to_string(),
        message: e.to_string(),
    })
}

#[async_trait]
impl IndexingService for HttpIndexingService {
    async fn fetch_and_index_url(&self, submission: &UrlSubmission) -> ServiceResult<FetchOutcome> {
        let endpoint = self.endpoint(FETCH_URL_PATH)?;
        tracing::debug!("POST {} for {}", endpoint, submission.url);

        let response = self
            .client
            .post(endpoint.clone())
            .json(submission)
            .send()
            .await
            .map_err(|source| ServiceError::Http {
                url: endpoint.to_string(),
                source,
            })?;

        read_json(&endpoint, response).await
    }

    async fn fetch_and_index_batch(
        &self,
        sources: &[UrlSubmission],
    ) -> ServiceResult<BatchResponse> {
        let endpoint = self.endpoint(FETCH_BATCH_PATH)?;
        tracing::debug!("POST {} with {} sources", endpoint, sources.len());

        let response = self
            .client
            .post(endpoint.clone())
            .json(&BatchRequest { sources })
            .send()
            .await
            .map_err(|source| ServiceError::Http {
                url: endpoint.to_string(),
                source,
            })?;

        read_json(&endpoint, response).await
    }

    async fn get_indexed_urls(&self) -> ServiceResult<HashSet<String>> {
        let endpoint = self.endpoint(INDEXED_URLS_PATH)?;

        let response = self
            .client
            .get(endpoint.clone())
            .send()
            .await
            .map_err(|source| ServiceError::Http {
                url: endpoint.to_string(),
                source,
            })?;

        let decoded: IndexedUrlsResponse = read_json(&endpoint, response).await?;
        Ok(decoded.urls.into_iter().collect())
    }
}
