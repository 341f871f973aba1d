//! Posting lists
//!
//! A posting records one document's occurrences of one term; a posting
//! list collects every document containing that term. The invariant
//! `document_frequency == postings.len()` holds at all times, and an
//! emptied posting list must be pruned from its index by the caller —
//! dangling empty lists corrupt IDF.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use starsearch_core::Field;

// ============================================================================
// DocumentPosting
// ============================================================================

/// One document's entry within a term's posting list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentPosting {
    /// Owning document id
    pub document_id: String,
    /// Occurrences of the term in the document
    pub term_frequency: u32,
    /// Ordinal positions of each occurrence in the document's token stream
    pub positions: SmallVec<[u32; 4]>,
    /// Configured weight of each field the term occurs in
    pub field_boosts: FxHashMap<Field, f32>,
}

impl DocumentPosting {
    /// Create a posting for one document.
    pub fn new(document_id: impl Into<String>, term_frequency: u32) -> Self {
        DocumentPosting {
            document_id: document_id.into(),
            term_frequency,
            positions: SmallVec::new(),
            field_boosts: FxHashMap::default(),
        }
    }

    /// Highest boost across the fields this term occurs in for this
    /// document. Boosts never sum: a term in both name and topics gets
    /// the name weight alone.
    pub fn max_field_boost(&self) -> f32 {
        self.field_boosts
            .values()
            .copied()
            .fold(1.0_f32, f32::max)
    }
}

// ============================================================================
// PostingList
// ============================================================================

/// Per-term record of which documents contain it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostingList {
    /// The stemmed term this list belongs to
    pub term: String,
    /// Number of documents containing the term
    pub document_frequency: usize,
    /// One posting per document
    pub postings: Vec<DocumentPosting>,
}

impl PostingList {
    /// Empty list for a term.
    pub fn new(term: impl Into<String>) -> Self {
        PostingList {
            term: term.into(),
            document_frequency: 0,
            postings: Vec::new(),
        }
    }

    /// Add a posting, replacing any existing posting for the same
    /// document so re-adds never duplicate.
    pub fn add(&mut self, posting: DocumentPosting) {
        self.postings
            .retain(|p| p.document_id != posting.document_id);
        self.postings.push(posting);
        self.document_frequency = self.postings.len();
    }

    /// Remove a document's posting. Returns true when one was present.
    pub fn remove(&mut self, document_id: &str) -> bool {
        let before = self.postings.len();
        self.postings.retain(|p| p.document_id != document_id);
        self.document_frequency = self.postings.len();
        before != self.postings.len()
    }

    /// Look up one document's posting.
    pub fn get(&self, document_id: &str) -> Option<&DocumentPosting> {
        self.postings.iter().find(|p| p.document_id == document_id)
    }

    /// True when no document contains the term any more; the caller must
    /// then prune this list from its index.
    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_keeps_df_in_sync() {
        let mut list = PostingList::new("json");
        list.add(DocumentPosting::new("1", 2));
        list.add(DocumentPosting::new("2", 1));
        assert_eq!(list.document_frequency, 2);
        assert_eq!(list.document_frequency, list.postings.len());
    }

    #[test]
    fn test_re_add_replaces_instead_of_duplicating() {
        let mut list = PostingList::new("json");
        list.add(DocumentPosting::new("1", 2));
        list.add(DocumentPosting::new("1", 5));
        assert_eq!(list.document_frequency, 1);
        assert_eq!(list.get("1").unwrap().term_frequency, 5);
    }

    #[test]
    fn test_remove_updates_df() {
        let mut list = PostingList::new("json");
        list.add(DocumentPosting::new("1", 1));
        list.add(DocumentPosting::new("2", 1));
        assert!(list.remove("1"));
        assert_eq!(list.document_frequency, 1);
        assert!(!list.remove("1"));
        assert!(list.remove("2"));
        assert!(list.is_empty());
    }

    #[test]
    fn test_max_field_boost_takes_max_not_sum() {
        let mut posting = DocumentPosting::new("1", 1);
        posting.field_boosts.insert(Field::Name, 2.0);
        posting.field_boosts.insert(Field::Topics, 1.8);
        assert_eq!(posting.max_field_boost(), 2.0);
    }

    #[test]
    fn test_max_field_boost_defaults_to_one() {
        let posting = DocumentPosting::new("1", 1);
        assert_eq!(posting.max_field_boost(), 1.0);
    }
}
