//! Stop-word filtering
//!
//! Drops tokens that carry no search signal: a fixed English +
//! programming-jargon set, single-character tokens, and anything that is
//! not a word token.

use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;
use starsearch_core::{Token, TokenKind};

static STOP_WORDS: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        // English
        "a", "an", "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with",
        "by", "from", "is", "are", "was", "were", "be", "been", "being", "this", "that",
        "these", "those", "it", "its", "as", "not", "no", "if", "then", "than", "so", "can",
        "will", "just", "about", "into", "over", "after", "more", "most", "other", "some",
        "such", "only", "own", "same", "too", "very", "you", "your", "we", "they", "what",
        "which", "who", "how", "when", "where", "why", "any", "all", "each", "both",
        // Programming jargon that appears in nearly every repository blurb
        "code", "programming", "software", "using", "use", "used", "based", "via", "made",
        "make", "makes", "simple", "easy", "library", "awesome", "plugin",
    ]
    .into_iter()
    .collect()
});

/// True when the normalized form is in the stop-word set.
pub fn is_stop_word(normalized: &str) -> bool {
    STOP_WORDS.contains(normalized)
}

/// Filter a token stream down to index-worthy word tokens
pub fn remove_stop_words(tokens: Vec<Token>) -> Vec<Token> {
    tokens
        .into_iter()
        .filter(|t| {
            t.kind == TokenKind::Word && t.normalized.len() > 1 && !is_stop_word(&t.normalized)
        })
        .collect()
}
