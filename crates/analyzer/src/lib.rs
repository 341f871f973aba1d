//! Text analysis for the starsearch engine
//!
//! This crate provides:
//! - Field-aware tokenization with positions
//! - Normalization (lowercasing, charset stripping, synonym expansion)
//! - Heuristic suffix-stripping stemmer with a bounded memo cache
//! - Stop-word filtering
//! - Jaccard similarity, Levenshtein distance, fuzzy suggestion ranking
//! - Keyword extraction
//!
//! The analyzer has no index dependencies; the index and engine crates
//! build on it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod keywords;
pub mod normalize;
pub mod similarity;
pub mod stemmer;
pub mod stopwords;
pub mod tokenizer;

pub use keywords::{extract_keywords, Keyword};
pub use normalize::normalize;
pub use similarity::{
    calculate_similarity, generate_fuzzy_suggestions, levenshtein, FuzzySuggestion,
};
pub use stemmer::{clear_stem_cache, stem, STEM_CACHE_CAP};
pub use stopwords::{is_stop_word, remove_stop_words};
pub use tokenizer::tokenize;
