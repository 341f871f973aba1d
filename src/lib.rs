//! starsearch - Embeddable keyword search over starred GitHub repositories
//!
//! starsearch builds an in-memory inverted index over repository
//! metadata and answers a small query language: terms, quoted phrases,
//! `field:value` clauses, numeric ranges (`stars:>100`), wildcards
//! (`json*`), fuzzy terms (`jsn~2`), and `AND`/`OR`/`NOT` operators.
//! Relevance is TF-IDF with per-field boosting; results carry highlight
//! spans and ranking metadata. Suggestions blend index vocabulary with
//! search history.
//!
//! # Quick Start
//!
//! ```ignore
//! use starsearch::{EngineConfig, SearchQuery, UnifiedSearchEngine};
//!
//! let engine = UnifiedSearchEngine::new(EngineConfig::default());
//! engine.index_repositories(&starred_repos)?;
//!
//! let results = engine.search(&SearchQuery::keyword("json parser language:rust"))?;
//! for hit in &results.hits {
//!     println!("{} ({:.2})", hit.repository.name, hit.score);
//! }
//! ```
//!
//! # Architecture
//!
//! [`UnifiedSearchEngine`] is the front door: it validates and
//! dispatches queries, records history, and merges suggestions. The
//! member crates underneath are usable on their own - the analyzer for
//! text processing, the index for posting-list storage, the engine for
//! query execution, and the history service for usage-derived
//! suggestions.

// Shared types, errors, configuration, and the storage trait
pub use starsearch_core::*;

// Text analysis building blocks
pub use starsearch_analyzer::{
    calculate_similarity, extract_keywords, generate_fuzzy_suggestions, normalize,
    remove_stop_words, stem, tokenize, FuzzySuggestion, Keyword,
};

// Index construction and maintenance
pub use starsearch_index::{
    DocumentPosting, IndexManager, IndexMetadata, IndexedDocument, PostingList, SearchIndex,
    SNAPSHOT_VERSION,
};

// Query execution
pub use starsearch_engine::{parse_query, KeywordSearchEngine};

// Search history and usage suggestions
pub use starsearch_history::{HistoryEntry, SearchHistoryService, TermStats};

// The orchestrator
pub use starsearch_unified::UnifiedSearchEngine;
