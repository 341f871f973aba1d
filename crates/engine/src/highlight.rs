//! Highlight span generation
//!
//! Finds byte-offset spans of matched terms and phrases in the raw field
//! text for client-side rendering. Matching is ASCII-case-insensitive;
//! overlapping spans are merged in favor of the earlier, longer one.

use starsearch_core::{HighlightKind, HighlightSpan};

/// Occurrences of a single term in a field's raw text
pub fn find_highlights(text: &str, needle: &str, kind: HighlightKind) -> Vec<HighlightSpan> {
    if needle.is_empty() || text.len() < needle.len() {
        return Vec::new();
    }
    let haystack = text.as_bytes();
    let target = needle.as_bytes();
    let mut spans = Vec::new();

    let mut i = 0;
    while i + target.len() <= haystack.len() {
        if haystack[i..i + target.len()].eq_ignore_ascii_case(target)
            && text.is_char_boundary(i)
            && text.is_char_boundary(i + target.len())
        {
            spans.push(HighlightSpan {
                start: i,
                end: i + target.len(),
                text: text[i..i + target.len()].to_string(),
                kind,
            });
            i += target.len();
        } else {
            i += 1;
        }
    }
    spans
}

/// Occurrences of a whole quoted phrase
pub fn find_phrase_highlights(text: &str, phrase: &str) -> Vec<HighlightSpan> {
    find_highlights(text, phrase, HighlightKind::Phrase)
}

/// Sort spans by start offset and drop any that overlap an earlier span
pub fn merge_spans(mut spans: Vec<HighlightSpan>) -> Vec<HighlightSpan> {
    spans.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));
    let mut merged: Vec<HighlightSpan> = Vec::new();
    for span in spans {
        match merged.last() {
            Some(last) if span.start < last.end => {}
            _ => merged.push(span),
        }
    }
    merged
}
