//! Search history: a capped log of past searches, popular-term
//! statistics, and suggestions derived from both. State persists
//! through the core [`SnapshotStore`](starsearch_core::SnapshotStore)
//! trait so embedders choose the storage.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod entry;
mod service;

pub use entry::{HistoryEntry, TermStats};
pub use service::SearchHistoryService;
