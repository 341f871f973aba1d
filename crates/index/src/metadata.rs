//! Index metadata
//!
//! Corpus-level statistics recomputed after every add, update, and
//! remove. Scoring reads `document_count`; the rest is diagnostic.

use crate::document::IndexedDocument;
use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use starsearch_core::Field;

/// Per-field statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldStats {
    /// Documents that populate this field
    pub documents: usize,
    /// Kept tokens across those documents
    pub total_tokens: usize,
    /// Mean kept tokens per populated document
    pub avg_length: f32,
}

/// Corpus-level index statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexMetadata {
    /// Indexed documents
    pub document_count: usize,
    /// Distinct stemmed terms in the global index
    pub term_count: usize,
    /// Mean kept tokens per document
    pub avg_document_length: f32,
    /// Statistics per concrete field
    pub field_stats: FxHashMap<Field, FieldStats>,
    /// When the index was created or last cleared
    pub created_at: DateTime<Utc>,
    /// When the last mutation finished
    pub updated_at: DateTime<Utc>,
}

impl Default for IndexMetadata {
    fn default() -> Self {
        let now = Utc::now();
        IndexMetadata {
            document_count: 0,
            term_count: 0,
            avg_document_length: 0.0,
            field_stats: FxHashMap::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl IndexMetadata {
    /// Recompute everything except `created_at` from the current
    /// documents and term count.
    pub fn recompute<'a>(
        &mut self,
        documents: impl Iterator<Item = &'a IndexedDocument>,
        term_count: usize,
    ) {
        let mut document_count = 0usize;
        let mut total_tokens = 0usize;
        let mut field_stats: FxHashMap<Field, FieldStats> = FxHashMap::default();

        for doc in documents {
            document_count += 1;
            total_tokens += doc.tokens.len();
            for (&field, &length) in &doc.field_lengths {
                if field == Field::All {
                    continue;
                }
                let stats = field_stats.entry(field).or_default();
                stats.documents += 1;
                stats.total_tokens += length;
            }
        }

        for stats in field_stats.values_mut() {
            stats.avg_length = if stats.documents == 0 {
                0.0
            } else {
                stats.total_tokens as f32 / stats.documents as f32
            };
        }

        self.document_count = document_count;
        self.term_count = term_count;
        self.avg_document_length = if document_count == 0 {
            0.0
        } else {
            total_tokens as f32 / document_count as f32
        };
        self.field_stats = field_stats;
        self.updated_at = Utc::now();
    }
}
