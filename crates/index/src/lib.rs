//! Inverted index for the starsearch engine
//!
//! This crate provides:
//! - IndexedDocument: analyzed form of one repository record
//! - DocumentPosting / PostingList: per-term occurrence records
//! - IndexManager: single-writer, multi-reader index owner
//! - IndexMetadata: corpus statistics, recomputed after every mutation
//! - Snapshot serialization for the external key-value store

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod manager;
pub mod metadata;
pub mod posting;
pub mod snapshot;

pub use document::{IndexedDocument, TermOccurrence};
pub use manager::{IndexManager, SearchIndex};
pub use metadata::{FieldStats, IndexMetadata};
pub use posting::{DocumentPosting, PostingList};
pub use snapshot::SNAPSHOT_VERSION;
