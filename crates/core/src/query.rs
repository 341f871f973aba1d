//! Query types
//!
//! `SearchQuery` is the caller-facing request; `ParsedQuery` is the
//! engine's parsed form. Clause kinds are a sum type matched exhaustively
//! by the executor, so adding a clause kind is a compile error until every
//! consumer handles it.

use crate::types::Field;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// SearchQuery
// ============================================================================

/// Routing class of a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QueryType {
    /// Keyword search against the inverted index
    #[default]
    Keyword,
    /// Reserved: embedding-based search
    Semantic,
    /// Reserved: conversational search
    Conversational,
    /// Placeholder alias, currently routed to keyword search
    Hybrid,
}

/// Result ordering key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Relevance score (default)
    #[default]
    Relevance,
    /// Repository name, lexicographic
    Name,
    /// Star count
    Stars,
    /// Last update timestamp
    Updated,
    /// Creation timestamp
    Created,
}

/// Result ordering direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Descending (default: best/most first)
    #[default]
    Desc,
    /// Ascending
    Asc,
}

/// Hard predicates applied after scoring
///
/// A candidate failing any active predicate is dropped from the result
/// set entirely, regardless of score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    /// Exact primary-language match (case-insensitive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Minimum star count, inclusive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_stars: Option<u32>,
    /// Maximum star count, inclusive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_stars: Option<u32>,
    /// When false, archived repositories are excluded
    #[serde(default = "default_true")]
    pub include_archived: bool,
    /// When false, forks are excluded
    #[serde(default = "default_true")]
    pub include_forks: bool,
    /// Creation date lower bound, inclusive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_after: Option<DateTime<Utc>>,
    /// Creation date upper bound, inclusive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_before: Option<DateTime<Utc>>,
    /// Update date lower bound, inclusive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_after: Option<DateTime<Utc>>,
    /// Update date upper bound, inclusive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_before: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

impl SearchFilters {
    /// Filters that admit everything.
    pub fn none() -> Self {
        SearchFilters {
            include_archived: true,
            include_forks: true,
            ..SearchFilters::default()
        }
    }

    /// True when no predicate would exclude anything.
    pub fn is_empty(&self) -> bool {
        self.language.is_none()
            && self.min_stars.is_none()
            && self.max_stars.is_none()
            && self.include_archived
            && self.include_forks
            && self.created_after.is_none()
            && self.created_before.is_none()
            && self.updated_after.is_none()
            && self.updated_before.is_none()
    }
}

/// Per-query execution options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Maximum results to return
    pub limit: usize,
    /// Results to skip before the first returned one
    pub offset: usize,
    /// Ordering key
    pub sort_by: SortBy,
    /// Ordering direction
    pub sort_order: SortOrder,
    /// Skip case folding of non-phrase clause values
    pub case_sensitive: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            limit: 20,
            offset: 0,
            sort_by: SortBy::default(),
            sort_order: SortOrder::default(),
            case_sensitive: false,
        }
    }
}

/// A caller-facing search request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Raw query text
    pub text: String,
    /// Routing class
    pub query_type: QueryType,
    /// Hard predicates
    pub filters: SearchFilters,
    /// Execution options
    pub options: SearchOptions,
}

impl SearchQuery {
    /// Keyword query with default filters and options.
    pub fn keyword(text: impl Into<String>) -> Self {
        SearchQuery {
            text: text.into(),
            query_type: QueryType::Keyword,
            filters: SearchFilters::none(),
            options: SearchOptions::default(),
        }
    }

    /// Builder: replace filters.
    pub fn with_filters(mut self, filters: SearchFilters) -> Self {
        self.filters = filters;
        self
    }

    /// Builder: replace options.
    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }
}

// ============================================================================
// Parsed form
// ============================================================================

/// Comparator of a numeric range clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeOp {
    /// Strictly greater
    Gt,
    /// Greater or equal
    Gte,
    /// Strictly less
    Lt,
    /// Less or equal
    Lte,
}

impl RangeOp {
    /// Apply the comparator.
    pub fn matches(&self, actual: u64, bound: u64) -> bool {
        match self {
            RangeOp::Gt => actual > bound,
            RangeOp::Gte => actual >= bound,
            RangeOp::Lt => actual < bound,
            RangeOp::Lte => actual <= bound,
        }
    }
}

/// How a clause combines the *next* clause into the accumulated
/// candidate set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ClauseOperator {
    /// Union, scores summed (default; operator-free queries are soft-OR)
    #[default]
    Or,
    /// Intersection, scores summed
    And,
    /// Exclusion of the next clause's documents
    Not,
}

/// The payload of one parsed clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClauseKind {
    /// Bare term matched against the global index
    Term {
        /// The term as written (pre-stemming)
        value: String,
    },
    /// Quoted phrase; words must co-occur in a document
    Phrase {
        /// The phrase without quotes
        value: String,
    },
    /// `field:value` scoped term
    Field {
        /// Target field
        field: Field,
        /// The value to match within that field
        value: String,
    },
    /// `field:>=N` numeric comparison
    Range {
        /// Numeric attribute name as written (`stars`, `forks`, `issues`)
        field: String,
        /// Comparator
        op: RangeOp,
        /// Bound
        value: u64,
    },
    /// Pattern with `*` wildcards matched against the vocabulary
    Wildcard {
        /// The pattern as written
        pattern: String,
    },
    /// `value~N` fuzzy term
    Fuzzy {
        /// The term before `~`
        value: String,
        /// Maximum edit distance
        distance: u32,
    },
}

/// One parsed clause with its combining operator and boost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryClause {
    /// What to match
    pub kind: ClauseKind,
    /// How the following clause combines with the accumulator
    pub operator: ClauseOperator,
    /// Score multiplier, default 1.0
    pub boost: f32,
}

impl QueryClause {
    /// Clause with the default operator and boost.
    pub fn new(kind: ClauseKind) -> Self {
        QueryClause {
            kind,
            operator: ClauseOperator::default(),
            boost: 1.0,
        }
    }
}

/// Fully parsed query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedQuery {
    /// The raw text the clauses were parsed from
    pub original_text: String,
    /// Ordered clauses
    pub clauses: Vec<QueryClause>,
    /// Hard predicates carried over from the request
    pub filters: SearchFilters,
    /// Options carried over from the request
    pub options: SearchOptions,
}
