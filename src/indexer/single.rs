//! Single-source indexing
//!
//! One logical source may expand into several URLs. Each URL that is not
//! already indexed is submitted on its own; the per-URL outcomes are then
//! folded into a single [`IndexResult`].

use crate::indexer::{IndexResult, SourceIndexer, SourceRequest};
use crate::service::Document;
use crate::url::{extract_valid_urls, ExtractedUrls};

/// Outcome of one expanded URL
#[derive(Debug)]
struct UrlOutcome {
    url: String,
    success: bool,
    was_already_indexed: bool,
    document: Option<Document>,
    error: Option<String>,
}

impl UrlOutcome {
    fn already_indexed(url: &str) -> Self {
        Self {
            url: url.to_string(),
            success: true,
            was_already_indexed: true,
            document: None,
            error: None,
        }
    }

    fn failed(url: &str, error: String) -> Self {
        Self {
            url: url.to_string(),
            success: false,
            was_already_indexed: false,
            document: None,
            error: Some(error),
        }
    }
}

/// Joins failed outcomes as `url: error; url: error`
fn describe_failures(outcomes: &[UrlOutcome]) -> String {
    outcomes
        .iter()
        .filter(|o| !o.success)
        .map(|o| format!("{}: {}", o.url, o.error.as_deref().unwrap_or("unknown error")))
        .collect::<Vec<_>>()
        .join("; ")
}

impl SourceIndexer {
    /// Indexes one logical source
    ///
    /// # Flow
    ///
    /// 1. Expand the raw URL; with no valid URL, report an input error and
    ///    leave all state untouched
    /// 2. Mark every URL in-flight before any I/O
    /// 3. For each URL in order, skip it if already indexed, otherwise call
    ///    the service
    /// 4. Add every successful URL to the indexed set in one update
    /// 5. Release the in-flight marks, whatever happened
    ///
    /// The source succeeds if any of its URLs succeeded. When only some did,
    /// `error` carries a warning listing the failures.
    ///
    /// Never fails: every problem is reported in the returned result.
    pub async fn index_source(&self, request: &SourceRequest) -> IndexResult {
        let ExtractedUrls { urls, original } = extract_valid_urls(&request.raw_url);

        if urls.is_empty() {
            tracing::warn!("No valid URLs in source '{}'", original);
            return IndexResult::invalid(request);
        }

        let in_flight = self.tracker.begin_indexing(urls.clone());
        let mut outcomes = Vec::with_capacity(urls.len());

        for url in in_flight.urls() {
            if self.tracker.contains_indexed(url) {
                tracing::debug!("Skipping {}: already indexed", url);
                outcomes.push(UrlOutcome::already_indexed(url));
                continue;
            }

            let submission = request.submission_for(url);
            let outcome = match self.service.fetch_and_index_url(&submission).await {
                Ok(fetched) if fetched.is_success() => UrlOutcome {
                    url: url.clone(),
                    success: true,
                    was_already_indexed: fetched.was_already_indexed,
                    document: fetched.document,
                    error: None,
                },
                Ok(fetched) => UrlOutcome::failed(
                    url,
                    fetched.error.unwrap_or_else(|| "unknown error".to_string()),
                ),
                Err(e) => UrlOutcome::failed(url, e.to_string()),
            };

            if let Some(error) = &outcome.error {
                tracing::warn!("Failed to index {}: {}", url, error);
            }
            outcomes.push(outcome);
        }

        let succeeded = outcomes.iter().filter(|o| o.success).count();
        let any_success = succeeded > 0;
        let all_already_indexed = outcomes.iter().all(|o| o.was_already_indexed);

        let successful_urls: Vec<String> = outcomes
            .iter()
            .filter(|o| o.success)
            .map(|o| o.url.clone())
            .collect();
        self.tracker.mark_indexed(successful_urls);

        let error = if succeeded == outcomes.len() {
            None
        } else if any_success {
            Some(format!(
                "Partially indexed ({}/{}): {}",
                succeeded,
                outcomes.len(),
                describe_failures(&outcomes)
            ))
        } else {
            Some(format!("Failed to index: {}", describe_failures(&outcomes)))
        };

        let url = match urls.as_slice() {
            [only] => only.clone(),
            _ => original,
        };
        let document = outcomes.into_iter().find_map(|o| o.document);

        tracing::debug!(
            "Indexed source {}: success={}, already_indexed={}",
            url,
            any_success,
            all_already_indexed
        );

        IndexResult {
            url,
            success: any_success,
            was_already_indexed: all_already_indexed,
            document,
            error,
            title: Some(request.title.clone()),
            source_type: Some(request.source_type),
        }
    }
}
