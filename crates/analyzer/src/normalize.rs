//! Token normalization
//!
//! Lowercases, strips everything outside `[a-z0-9-]`, then expands a fixed
//! synonym table for common language and domain abbreviations. Synonym
//! expansion replaces the whole token, never a substring.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

/// Whole-token synonym table for abbreviations that users type but
/// repository metadata spells out.
static SYNONYMS: Lazy<FxHashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut map = FxHashMap::default();
    // Language abbreviations
    map.insert("js", "javascript");
    map.insert("ts", "typescript");
    map.insert("py", "python");
    map.insert("rb", "ruby");
    map.insert("k8s", "kubernetes");
    // Domain abbreviations
    map.insert("ui", "user-interface");
    map.insert("db", "database");
    map.insert("ml", "machine-learning");
    map.insert("ai", "artificial-intelligence");
    map.insert("cli", "command-line");
    map
});

/// Normalize one token
pub fn normalize(token: &str) -> String {
    let cleaned: String = token
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect();

    match SYNONYMS.get(cleaned.as_str()) {
        Some(expanded) => (*expanded).to_string(),
        None => cleaned,
    }
}
