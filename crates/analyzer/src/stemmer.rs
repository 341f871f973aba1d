//! Heuristic suffix-stripping stemmer
//!
//! Not a full Porter stemmer: a fixed ordered suffix list is tried against
//! tokens longer than 3 characters, the longest matching suffix is
//! stripped, a doubled trailing consonant left by `ing` removal is
//! collapsed, then a trailing non-`ss` `s` handles simple plurals.
//!
//! Results are memoized in a bounded cache: once the cache reaches
//! `STEM_CACHE_CAP` entries it is cleared and refilled, so a long-running
//! process never grows it without bound.

use dashmap::DashMap;
use once_cell::sync::Lazy;

/// Suffixes tried in order; the longest match wins.
const SUFFIXES: [&str; 17] = [
    "tion", "sion", "ness", "ment", "able", "ible", "ous", "ive", "ize", "ise", "ing", "ed",
    "er", "est", "ly", "ful", "less",
];

/// Cap on memoized entries; the cache is cleared when it fills.
pub const STEM_CACHE_CAP: usize = 8_192;

static STEM_CACHE: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

/// Stem a normalized token
pub fn stem(token: &str) -> String {
    if token.len() <= 3 {
        return token.to_string();
    }

    if let Some(cached) = STEM_CACHE.get(token) {
        return cached.clone();
    }

    let stemmed = stem_uncached(token);

    if STEM_CACHE.len() >= STEM_CACHE_CAP {
        STEM_CACHE.clear();
    }
    STEM_CACHE.insert(token.to_string(), stemmed.clone());

    stemmed
}

/// Drop all memoized stems. Exposed for callers that re-analyze large
/// corpora and want deterministic memory use between runs.
pub fn clear_stem_cache() {
    STEM_CACHE.clear();
}

fn stem_uncached(token: &str) -> String {
    let mut stem = token.to_string();

    // Longest matching suffix wins; the remainder must keep at least
    // 2 characters or the strip is skipped.
    let mut best: Option<&str> = None;
    for suffix in SUFFIXES {
        if stem.ends_with(suffix) && stem.len() - suffix.len() >= 2 {
            match best {
                Some(b) if b.len() >= suffix.len() => {}
                _ => best = Some(suffix),
            }
        }
    }

    if let Some(suffix) = best {
        stem.truncate(stem.len() - suffix.len());

        // "running" -> "runn" -> "run"
        if suffix == "ing" {
            let chars: Vec<char> = stem.chars().collect();
            if chars.len() >= 2 {
                let last = chars[chars.len() - 1];
                if last == chars[chars.len() - 2] && last.is_ascii_alphabetic() && !is_vowel(last)
                {
                    stem.pop();
                }
            }
        }
    }

    // Simple pluralization: trailing s, but never ss.
    if stem.len() > 3 && stem.ends_with('s') && !stem.ends_with("ss") {
        stem.pop();
    }

    stem
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}
