//! Cooperative cancellation signal for a batch
//!
//! Cancelling only flips the token. The batch indexer checks it between
//! results; a service call already issued always runs to completion.

pub use tokio_util::sync::CancellationToken;
