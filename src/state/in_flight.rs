use crate::state::IndexStateTracker;

/// Keeps a set of URLs marked in-flight for as long as it is alive
///
/// Dropping the guard removes its URLs from the in-flight set. This runs on
/// every exit path: normal return, early return, and a dropped future.
#[derive(Debug)]
#[must_use = "URLs stop being in-flight as soon as the guard is dropped"]
pub struct InFlightGuard<'a> {
    tracker: &'a IndexStateTracker,
    urls: Vec<String>,
}

impl<'a> InFlightGuard<'a> {
    pub(crate) fn new(tracker: &'a IndexStateTracker, urls: Vec<String>) -> Self {
        Self { tracker, urls }
    }

    /// Returns the URLs held in-flight by this guard
    pub fn urls(&self) -> &[String] {
        &self.urls
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.tracker.finish_indexing(&self.urls);
    }
}
