//! Batch progress reporting
//!
//! Progress is published through a `tokio::sync::watch` channel so callers can
//! observe every counter update while a batch is running.

use crate::service::BatchStatus;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;

/// Live counters for a batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchProgress {
    /// Number of logical requests in the batch
    pub total: usize,

    /// Number of expanded URLs submitted to the service
    pub total_urls: usize,

    /// Service results processed so far
    pub completed: usize,

    /// URLs newly indexed
    pub indexed: usize,

    /// URLs the service already held
    pub already_indexed: usize,

    /// Invalid requests plus URLs that failed
    pub failed: usize,

    pub is_running: bool,

    pub started_at: Option<DateTime<Utc>>,

    pub finished_at: Option<DateTime<Utc>>,
}

impl BatchProgress {
    /// Fraction of submitted URLs processed, in `0.0..=1.0`
    pub fn fraction_complete(&self) -> f64 {
        if self.total_urls == 0 {
            return 0.0;
        }
        self.completed as f64 / self.total_urls as f64
    }
}

/// Publishes the final counters of a batch where every request was rejected
///
/// The batch never runs, so `is_running` stays false.
pub(crate) fn publish_rejected(sender: &watch::Sender<BatchProgress>, total: usize, invalid: usize) {
    let now = Utc::now();
    sender.send_replace(BatchProgress {
        total,
        failed: invalid,
        started_at: Some(now),
        finished_at: Some(now),
        ..BatchProgress::default()
    });
}

/// Publishes progress for one running batch
///
/// Dropping the reporter marks the batch as no longer running, whichever way
/// the batch exits.
pub(crate) struct ProgressReporter<'a> {
    sender: &'a watch::Sender<BatchProgress>,
}

impl<'a> ProgressReporter<'a> {
    /// Resets the counters and marks a batch as running
    pub(crate) fn start(
        sender: &'a watch::Sender<BatchProgress>,
        total: usize,
        total_urls: usize,
        invalid: usize,
    ) -> Self {
        sender.send_replace(BatchProgress {
            total,
            total_urls,
            failed: invalid,
            is_running: true,
            started_at: Some(Utc::now()),
            ..BatchProgress::default()
        });
        Self { sender }
    }

    /// Counts one processed service result
    pub(crate) fn record(&self, status: BatchStatus) {
        self.sender.send_modify(|progress| {
            match status {
                BatchStatus::Indexed => progress.indexed += 1,
                BatchStatus::Exists => progress.already_indexed += 1,
                BatchStatus::Failed => progress.failed += 1,
            }
            progress.completed += 1;
        });
    }

    /// Counts URLs that failed without a per-URL result
    pub(crate) fn record_failures(&self, count: usize) {
        self.sender.send_modify(|progress| progress.failed += count);
    }
}

impl Drop for ProgressReporter<'_> {
    fn drop(&mut self) {
        self.sender.send_modify(|progress| {
            progress.is_running = false;
            progress.finished_at = Some(Utc::now());
        });
    }
}
