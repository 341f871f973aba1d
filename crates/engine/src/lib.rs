//! Keyword query parsing and execution.
//!
//! The engine turns raw query text into typed clauses, evaluates each
//! clause against the inverted index into TF-IDF based scores, applies
//! structured filters, and assembles highlighted, ranked results.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod engine;
mod filters;
mod highlight;
mod parser;

pub use engine::KeywordSearchEngine;
pub use filters::matches as matches_filters;
pub use highlight::{find_highlights, find_phrase_highlights, merge_spans};
pub use parser::{parse_query, DEFAULT_FUZZY_DISTANCE};
