//! Core types for the starsearch engine
//!
//! This crate defines the foundational types used throughout the system:
//! - RepoRecord / Field: inbound repository records and searchable fields
//! - Token / TokenKind: analyzer output
//! - SearchQuery / ParsedQuery / QueryClause: query shapes
//! - SearchResults / SearchSuggestion / ExplainTrace: outbound shapes
//! - EngineConfig: configuration sections and presets
//! - SearchError: error taxonomy
//! - SnapshotStore: persistence trait for the storage collaborator

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod query;
pub mod results;
pub mod token;
pub mod traits;
pub mod types;

// Re-export commonly used types at the crate root
pub use config::{
    CacheConfig, EngineConfig, FieldWeights, IndexingConfig, PerformanceConfig, SearchConfig,
};
pub use error::{Result, SearchError};
pub use query::{
    ClauseKind, ClauseOperator, ParsedQuery, QueryClause, QueryType, RangeOp, SearchFilters,
    SearchOptions, SearchQuery, SortBy, SortOrder,
};
pub use results::{
    ExplainStep, ExplainTrace, HighlightKind, HighlightSpan, ResultMetadata, SearchMatch,
    SearchResult, SearchResults, SearchSuggestion, SuggestionKind,
};
pub use token::{Token, TokenKind};
pub use traits::{MemoryStore, SnapshotStore};
pub use types::{Field, RepoOwner, RepoRecord};
