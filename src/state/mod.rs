//! State module for tracking indexing progress
//!
//! This module owns the coordinator's view of the knowledge base.
//!
//! # Components
//!
//! - `IndexStateTracker`: the indexed and in-flight URL sets
//! - `InFlightGuard`: scoped in-flight membership, released on drop

mod in_flight;
mod tracker;

// Re-export main types
pub use in_flight::InFlightGuard;
pub use tracker::IndexStateTracker;
