//! Keyword extraction
//!
//! Ranks stemmed terms of a text by `frequency × ln(length + 1)`, so
//! longer distinctive terms outrank short common ones at equal frequency.

use crate::stemmer::stem;
use crate::stopwords::remove_stop_words;
use crate::tokenizer::tokenize;
use rustc_hash::FxHashMap;
use starsearch_core::Field;

/// One extracted keyword with its score
#[derive(Debug, Clone, PartialEq)]
pub struct Keyword {
    /// Stemmed term
    pub term: String,
    /// `frequency × ln(length + 1)`
    pub score: f32,
}

/// Extract the top `max` keywords from free text
pub fn extract_keywords(text: &str, max: usize) -> Vec<Keyword> {
    let tokens = remove_stop_words(tokenize(text, Field::All));

    let mut frequencies: FxHashMap<String, u32> = FxHashMap::default();
    for token in tokens {
        let stemmed = stem(&token.normalized);
        if stemmed.is_empty() {
            continue;
        }
        *frequencies.entry(stemmed).or_insert(0) += 1;
    }

    let mut keywords: Vec<Keyword> = frequencies
        .into_iter()
        .map(|(term, freq)| {
            let score = freq as f32 * ((term.len() + 1) as f32).ln();
            Keyword { term, score }
        })
        .collect();

    keywords.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.term.cmp(&b.term))
    });
    keywords.truncate(max);
    keywords
}
