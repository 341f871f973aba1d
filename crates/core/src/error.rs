//! Error types for the search engine
//!
//! This module defines the error taxonomy used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use thiserror::Error;

/// Result type alias for search operations
pub type Result<T> = std::result::Result<T, SearchError>;

/// Error taxonomy for the search engine
///
/// All errors are raised synchronously as part of the failing call's
/// result. There is no automatic retry inside the core.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Malformed or oversized query input
    #[error("Invalid query: {reason}")]
    InvalidQuery {
        /// What made the query invalid
        reason: String,
    },

    /// Search attempted before the index was built or restored
    #[error("Index not ready: build or restore the index before searching")]
    IndexNotReady,

    /// Query execution exceeded the configured deadline
    #[error("Search timed out after {elapsed_ms}ms (limit {limit_ms}ms)")]
    Timeout {
        /// Time actually spent before the deadline check fired
        elapsed_ms: u64,
        /// Configured limit
        limit_ms: u64,
    },

    /// Query text could not be parsed
    #[error("Invalid query syntax: {reason}")]
    InvalidSyntax {
        /// What failed to parse
        reason: String,
    },

    /// A field-scoped or range clause named an unknown field
    #[error("Unknown field: {field}")]
    FieldNotFound {
        /// The field name as written in the query
        field: String,
    },

    /// Unexpected failure during indexing or search execution
    #[error("Internal search error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for SearchError {
    fn from(e: serde_json::Error) -> Self {
        SearchError::Internal(e.to_string())
    }
}

impl SearchError {
    /// Stable machine-readable code for this error, suitable for logs
    /// and for the history service's error column.
    pub fn code(&self) -> &'static str {
        match self {
            SearchError::InvalidQuery { .. } => "INVALID_QUERY",
            SearchError::IndexNotReady => "INDEX_NOT_READY",
            SearchError::Timeout { .. } => "SEARCH_TIMEOUT",
            SearchError::InvalidSyntax { .. } => "INVALID_SYNTAX",
            SearchError::FieldNotFound { .. } => "FIELD_NOT_FOUND",
            SearchError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
