//! History log entries and popular-term statistics

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use starsearch_core::SearchFilters;

/// One recorded search attempt, successful or not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Raw query text as submitted
    pub query: String,
    /// Number of hits the search returned (0 on failure)
    pub result_count: usize,
    /// Wall-clock execution time
    pub execution_time_ms: u64,
    /// Structured filters active for the search
    #[serde(default)]
    pub filters: SearchFilters,
    /// When the search ran
    pub timestamp: DateTime<Utc>,
    /// Error text when the search failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HistoryEntry {
    /// Entry for a search that returned results.
    pub fn success(
        query: impl Into<String>,
        result_count: usize,
        execution_time_ms: u64,
        filters: SearchFilters,
    ) -> Self {
        HistoryEntry {
            query: query.into(),
            result_count,
            execution_time_ms,
            filters,
            timestamp: Utc::now(),
            error: None,
        }
    }

    /// Entry for a search that failed before producing results.
    pub fn failure(
        query: impl Into<String>,
        error: impl Into<String>,
        execution_time_ms: u64,
        filters: SearchFilters,
    ) -> Self {
        HistoryEntry {
            query: query.into(),
            result_count: 0,
            execution_time_ms,
            filters,
            timestamp: Utc::now(),
            error: Some(error.into()),
        }
    }
}

/// Usage statistics for one popular term.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TermStats {
    /// How many recorded searches contained the term
    pub count: u32,
    /// Timestamp of the most recent use
    pub last_used: DateTime<Utc>,
}
