//! Result, suggestion, and explain-trace types
//!
//! These are the outbound shapes handed to the rendering collaborator:
//! ranked results with highlight spans, autocomplete suggestions, and the
//! developer-facing explain trace.

use crate::types::{Field, RepoRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Highlights
// ============================================================================

/// How a highlight span matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightKind {
    /// Literal occurrence of a query term
    Exact,
    /// Occurrence of a whole quoted phrase
    Phrase,
    /// Occurrence of a fuzzy-matched vocabulary term
    Fuzzy,
}

/// One byte-offset span to emphasize in a field's raw text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightSpan {
    /// Byte offset of the span start in the raw field text
    pub start: usize,
    /// Byte offset one past the span end
    pub end: usize,
    /// The covered text
    pub text: String,
    /// Match kind
    pub kind: HighlightKind,
}

/// Highlights for one matched field of one result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchMatch {
    /// The field the spans apply to
    pub field: Field,
    /// Spans in ascending start order
    pub highlights: Vec<HighlightSpan>,
}

// ============================================================================
// Results
// ============================================================================

/// Per-result scoring diagnostics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultMetadata {
    /// Fields in which at least one clause matched
    pub matched_fields: Vec<Field>,
    /// Named score components that contributed to the total
    pub relevance_factors: HashMap<String, f32>,
    /// Wall time of the whole search, milliseconds
    pub search_time_ms: u64,
    /// Score normalized against the best result, in [0, 1]
    pub confidence: f32,
}

/// One ranked search hit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The matched repository record
    pub repository: RepoRecord,
    /// Accumulated relevance score
    pub score: f32,
    /// Highlights, one entry per matched field
    pub matches: Vec<SearchMatch>,
    /// Scoring diagnostics
    pub metadata: ResultMetadata,
}

/// The full response for one search
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResults {
    /// Ranked hits after filtering, sorting, and offset/limit slicing
    pub hits: Vec<SearchResult>,
    /// Candidates that survived filtering, before slicing
    pub total: usize,
    /// Wall time, milliseconds
    pub elapsed_ms: u64,
}

// ============================================================================
// Suggestions
// ============================================================================

/// Where a suggestion came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    /// Index vocabulary term
    Term,
    /// Past query from the history log
    History,
    /// High-frequency term from past queries
    Popular,
}

/// One autocomplete candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSuggestion {
    /// Suggested text
    pub text: String,
    /// Source of the suggestion
    pub kind: SuggestionKind,
    /// Blended ranking score
    pub score: f32,
    /// Usage count, for history-derived suggestions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<u32>,
    /// Last time the suggestion's query ran, for history entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used: Option<DateTime<Utc>>,
}

// ============================================================================
// Explain trace
// ============================================================================

/// One named step of an explain trace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainStep {
    /// Step name (`query_parsing`, `term_lookup`, ...)
    pub name: String,
    /// Elapsed milliseconds, floored at 1 so steps never report zero
    pub elapsed_ms: u64,
    /// Step-specific details
    pub details: serde_json::Value,
}

/// Ordered diagnostic trace of a query's execution
///
/// Intended for developer-facing diagnostics, not end-user display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExplainTrace {
    /// The query text the trace describes
    pub query: String,
    /// Steps in execution order
    pub steps: Vec<ExplainStep>,
    /// Total elapsed milliseconds across all steps
    pub total_ms: u64,
}

impl ExplainTrace {
    /// Append a step, flooring its elapsed time at 1ms.
    pub fn push_step(
        &mut self,
        name: impl Into<String>,
        elapsed_ms: u64,
        details: serde_json::Value,
    ) {
        let elapsed_ms = elapsed_ms.max(1);
        self.total_ms += elapsed_ms;
        self.steps.push(ExplainStep {
            name: name.into(),
            elapsed_ms,
            details,
        });
    }
}
