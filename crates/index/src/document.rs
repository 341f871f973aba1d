//! Indexed document construction
//!
//! An `IndexedDocument` is the analyzed form of one repository record:
//! raw field texts, the filtered token stream, per-field lengths, and
//! stemmed term frequencies. Owned exclusively by the index manager.

use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use starsearch_analyzer::{remove_stop_words, stem, tokenize};
use starsearch_core::{Field, RepoRecord, Token};
use std::collections::BTreeMap;

/// Occurrences of one term within one field of one document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermOccurrence {
    /// Occurrence count within the field
    pub frequency: u32,
    /// Ordinal positions within the whole document token stream
    pub positions: Vec<u32>,
}

/// Analyzed form of one repository record
///
/// `tokens` holds the filtered tokens of the concrete fields in
/// extraction order; the synthetic `All` field is represented by
/// `searchable_text` and a summed entry in `field_lengths`, so term
/// frequencies count each occurrence exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedDocument {
    /// String form of the record's numeric id
    pub id: String,
    /// Raw text per populated field, in extraction order
    pub fields: BTreeMap<Field, String>,
    /// Stop-word-filtered tokens of the concrete fields
    pub tokens: Vec<Token>,
    /// Concatenation of all populated field texts
    pub searchable_text: String,
    /// Kept token count per field (`All` is the sum)
    pub field_lengths: FxHashMap<Field, usize>,
    /// Stemmed term -> occurrence count across concrete fields
    pub term_frequencies: FxHashMap<String, u32>,
    /// When this document was (re)built
    pub last_updated: DateTime<Utc>,
}

impl IndexedDocument {
    /// Analyze a record into its indexed form.
    pub fn analyze(record: &RepoRecord) -> Self {
        let id = record.document_id();
        let mut fields = BTreeMap::new();
        let mut tokens: Vec<Token> = Vec::new();
        let mut field_lengths: FxHashMap<Field, usize> = FxHashMap::default();
        let mut total_tokens = 0usize;

        for field in [
            Field::Name,
            Field::Description,
            Field::Topics,
            Field::Owner,
            Field::Language,
        ] {
            let Some(text) = record.field_text(field) else {
                continue;
            };
            let kept = remove_stop_words(tokenize(&text, field));
            field_lengths.insert(field, kept.len());
            total_tokens += kept.len();
            tokens.extend(kept);
            fields.insert(field, text);
        }

        let searchable_text = record.field_text(Field::All).unwrap_or_default();
        fields.insert(Field::All, searchable_text.clone());
        field_lengths.insert(Field::All, total_tokens);

        let mut term_frequencies: FxHashMap<String, u32> = FxHashMap::default();
        for token in &tokens {
            let stemmed = stem(&token.normalized);
            if stemmed.is_empty() {
                continue;
            }
            *term_frequencies.entry(stemmed).or_insert(0) += 1;
        }

        IndexedDocument {
            id,
            fields,
            tokens,
            searchable_text,
            field_lengths,
            term_frequencies,
            last_updated: Utc::now(),
        }
    }

    /// Per-term, per-field occurrence data: term frequency within the
    /// field and ordinal positions within the whole document token
    /// stream. One pass over the tokens; the manager turns this into
    /// global and field-scoped postings.
    pub fn occurrence_map(&self) -> FxHashMap<String, FxHashMap<Field, TermOccurrence>> {
        let mut map: FxHashMap<String, FxHashMap<Field, TermOccurrence>> = FxHashMap::default();
        for (ordinal, token) in self.tokens.iter().enumerate() {
            let stemmed = stem(&token.normalized);
            if stemmed.is_empty() {
                continue;
            }
            let entry = map
                .entry(stemmed)
                .or_default()
                .entry(token.field)
                .or_default();
            entry.frequency += 1;
            entry.positions.push(ordinal as u32);
        }
        map
    }
}
