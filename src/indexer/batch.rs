//! Batch indexing
//!
//! Many logical sources are expanded into URLs and submitted to the service
//! in a single round trip. Results are applied one at a time, in the order the
//! service returns them, so progress is observable mid-batch and cancellation
//! can stop between any two results.

use crate::indexer::progress::{publish_rejected, ProgressReporter};
use crate::indexer::{CancellationToken, IndexResult, SourceIndexer, SourceRequest};
use crate::service::UrlSubmission;
use crate::url::extract_valid_urls;
use std::collections::{HashMap, VecDeque};

impl SourceIndexer {
    /// Indexes many sources in one service call
    ///
    /// Installs a fresh cancellation token that [`SourceIndexer::cancel_batch`]
    /// can trigger. See [`SourceIndexer::index_sources_batch_with_token`].
    pub async fn index_sources_batch(&self, requests: &[SourceRequest]) -> Vec<IndexResult> {
        self.index_sources_batch_with_token(requests, CancellationToken::new())
            .await
    }

    /// Indexes many sources in one service call, stopping early when `token`
    /// is cancelled
    ///
    /// # Flow
    ///
    /// 1. Expand every request; requests without a valid URL become failed
    ///    results immediately and are never submitted
    /// 2. Return early if nothing is left; progress then only records the
    ///    rejected requests and never shows the batch as running
    /// 3. Reset progress: `total` counts requests, `failed` starts at the
    ///    number of invalid requests
    /// 4. Mark every expanded URL in-flight and submit them all at once
    /// 5. Walk the service results in order, checking the token before each;
    ///    counters update as each result is processed
    /// 6. Add every confirmed URL to the indexed set in one update
    ///
    /// If the service call fails, every expanded URL is reported failed with
    /// the service error. Cancellation never rolls back applied results.
    ///
    /// # Returns
    ///
    /// Results for invalid requests first, then one result per expanded URL
    /// in submission order.
    pub async fn index_sources_batch_with_token(
        &self,
        requests: &[SourceRequest],
        token: CancellationToken,
    ) -> Vec<IndexResult> {
        let _serialized = self.batch_lock.lock().await;
        self.install_batch_token(token.clone());

        let mut results = Vec::new();
        let mut work: Vec<UrlSubmission> = Vec::new();

        for request in requests {
            let extracted = extract_valid_urls(&request.raw_url);
            if extracted.is_empty() {
                tracing::warn!("No valid URLs in source '{}'", request.raw_url);
                results.push(IndexResult::invalid(request));
                continue;
            }

            work.extend(extracted.urls.iter().map(|url| request.submission_for(url)));
        }

        if work.is_empty() {
            tracing::info!("Batch of {} sources has no valid URLs", requests.len());
            publish_rejected(&self.progress, requests.len(), results.len());
            return results;
        }

        let reporter =
            ProgressReporter::start(&self.progress, requests.len(), work.len(), results.len());
        let _in_flight = self
            .tracker
            .begin_indexing(work.iter().map(|item| item.url.clone()).collect());

        tracing::info!(
            "Indexing batch: {} sources expanded to {} URLs ({} invalid)",
            requests.len(),
            work.len(),
            results.len()
        );

        let response = match self.service.fetch_and_index_batch(&work).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Batch indexing call failed: {}", e);
                let message = e.to_string();
                reporter.record_failures(work.len());
                results.extend(work.iter().map(|item| IndexResult::failed(item, message.clone())));
                return results;
            }
        };

        // Work item positions per URL; a URL may appear in several requests
        let mut pending: HashMap<&str, VecDeque<usize>> = HashMap::new();
        for (position, item) in work.iter().enumerate() {
            pending.entry(item.url.as_str()).or_default().push_back(position);
        }

        let mut slots: Vec<Option<IndexResult>> = vec![None; work.len()];
        let mut confirmed = Vec::new();
        let mut cancelled = false;

        for item in response.results {
            let Some(position) = pending.get_mut(item.url.as_str()).and_then(VecDeque::pop_front)
            else {
                tracing::warn!("Ignoring result for unsubmitted URL {}", item.url);
                continue;
            };

            if !cancelled {
                // Let cancel requests and progress observers run between results
                tokio::task::yield_now().await;
                if token.is_cancelled() {
                    tracing::info!(
                        "Batch cancelled at {:.0}%; remaining results will not be applied",
                        self.progress.borrow().fraction_complete() * 100.0
                    );
                    cancelled = true;
                }
            }

            if !cancelled {
                reporter.record(item.status);
                if item.status.is_confirmed() {
                    confirmed.push(item.url.clone());
                }
            }

            slots[position] = Some(IndexResult::from_batch_item(item, &work[position]));
        }

        let missing = slots.iter().filter(|slot| slot.is_none()).count();
        if missing > 0 && !cancelled {
            tracing::warn!("Indexing service returned no result for {} URLs", missing);
            reporter.record_failures(missing);
        }

        let added = self.tracker.mark_indexed(confirmed);
        tracing::info!("Batch finished: {} URLs added to index", added);

        results.extend(slots.into_iter().zip(&work).map(|(slot, item)| {
            slot.unwrap_or_else(|| {
                IndexResult::failed(item, "No result returned by indexing service")
            })
        }));
        results
    }
}
