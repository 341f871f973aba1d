//! Index manager
//!
//! Owns the inverted index, the per-field sub-indexes, the analyzed
//! documents, and the source records. All state lives behind a single
//! `RwLock`: mutations take the write half (one logical writer at a
//! time), searches take the read half and may overlap each other but
//! never a mutation. The internal mappings are never handed out mutably.

use crate::document::IndexedDocument;
use crate::metadata::IndexMetadata;
use crate::posting::{DocumentPosting, PostingList};
use crate::snapshot;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use starsearch_analyzer::stem;
use starsearch_core::{Field, IndexingConfig, RepoRecord, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

// ============================================================================
// SearchIndex
// ============================================================================

/// The complete index state
///
/// `field_index` is a denormalized partition of the same postings scoped
/// per field, consulted only by explicit field-qualified queries. The
/// source records ride along so filters and result assembly never need a
/// second store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchIndex {
    /// Analyzed documents by id
    pub documents: FxHashMap<String, IndexedDocument>,
    /// Source records by document id
    pub records: FxHashMap<String, RepoRecord>,
    /// Global stemmed-term -> posting list
    pub inverted_index: FxHashMap<String, PostingList>,
    /// Per-field stemmed-term -> posting list
    pub field_index: FxHashMap<Field, FxHashMap<String, PostingList>>,
    /// Corpus statistics
    pub metadata: IndexMetadata,
}

// ============================================================================
// IndexManager
// ============================================================================

/// Single-writer, multi-reader owner of the search index
pub struct IndexManager {
    config: IndexingConfig,
    index: RwLock<SearchIndex>,
    ready: AtomicBool,
}

impl IndexManager {
    /// Create an empty, not-yet-ready index.
    pub fn new(config: IndexingConfig) -> Self {
        IndexManager {
            config,
            index: RwLock::new(SearchIndex::default()),
            ready: AtomicBool::new(false),
        }
    }

    /// True once `build_index` or a snapshot restore has completed.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Rebuild the index wholesale from a batch of records
    ///
    /// Clears all state first, then processes records in fixed-size
    /// batches, logging progress per batch. Records beyond
    /// `max_documents` are skipped with a warning.
    pub fn build_index(&self, records: &[RepoRecord]) -> Result<()> {
        let mut index = self.index.write();
        *index = SearchIndex::default();

        let batch_size = self.config.batch_size.max(1);
        let mut indexed = 0usize;
        'batches: for (batch_no, chunk) in records.chunks(batch_size).enumerate() {
            for record in chunk {
                if index.documents.len() >= self.config.max_documents {
                    warn!(
                        max_documents = self.config.max_documents,
                        skipped = records.len() - indexed,
                        "document cap reached, remaining records skipped"
                    );
                    break 'batches;
                }
                Self::add_locked(&mut index, record, &self.config);
                indexed += 1;
            }
            Self::recompute_locked(&mut index);
            debug!(batch = batch_no, indexed, total = records.len(), "indexing progress");
        }

        Self::recompute_locked(&mut index);
        drop(index);
        self.ready.store(true, Ordering::Release);
        Ok(())
    }

    /// Index one record, replacing any previous version of it.
    pub fn add_document(&self, record: &RepoRecord) -> Result<()> {
        let mut index = self.index.write();
        let id = record.document_id();
        if !index.documents.contains_key(&id) && index.documents.len() >= self.config.max_documents
        {
            warn!(%id, "document cap reached, record not indexed");
            return Ok(());
        }
        Self::add_locked(&mut index, record, &self.config);
        Self::recompute_locked(&mut index);
        Ok(())
    }

    /// Full remove + re-add; there is no partial patch.
    pub fn update_document(&self, record: &RepoRecord) -> Result<()> {
        let mut index = self.index.write();
        Self::remove_locked(&mut index, &record.document_id());
        Self::add_locked(&mut index, record, &self.config);
        Self::recompute_locked(&mut index);
        Ok(())
    }

    /// Remove a document and prune every posting it contributed.
    ///
    /// Returns true when the document existed.
    pub fn remove_document(&self, id: &str) -> Result<bool> {
        let mut index = self.index.write();
        let removed = Self::remove_locked(&mut index, id);
        if removed {
            Self::recompute_locked(&mut index);
        }
        Ok(removed)
    }

    fn add_locked(index: &mut SearchIndex, record: &RepoRecord, config: &IndexingConfig) {
        let doc = IndexedDocument::analyze(record);

        // A re-add must never double-count: drop the old version first.
        if index.documents.contains_key(&doc.id) {
            Self::remove_locked(index, &doc.id.clone());
        }

        for (term, fields) in doc.occurrence_map() {
            let mut positions: SmallVec<[u32; 4]> = SmallVec::new();
            let mut field_boosts: FxHashMap<Field, f32> = FxHashMap::default();
            let mut term_frequency = 0u32;

            for (&field, occurrence) in &fields {
                term_frequency += occurrence.frequency;
                positions.extend_from_slice(&occurrence.positions);
                field_boosts.insert(field, config.field_weights.weight(field));
            }
            positions.sort_unstable();

            let posting = DocumentPosting {
                document_id: doc.id.clone(),
                term_frequency,
                positions,
                field_boosts,
            };
            index
                .inverted_index
                .entry(term.clone())
                .or_insert_with(|| PostingList::new(term.clone()))
                .add(posting);

            for (&field, occurrence) in &fields {
                let mut field_posting =
                    DocumentPosting::new(doc.id.clone(), occurrence.frequency);
                field_posting.positions.extend_from_slice(&occurrence.positions);
                field_posting
                    .field_boosts
                    .insert(field, config.field_weights.weight(field));
                index
                    .field_index
                    .entry(field)
                    .or_default()
                    .entry(term.clone())
                    .or_insert_with(|| PostingList::new(term.clone()))
                    .add(field_posting);
            }
        }

        index.records.insert(doc.id.clone(), record.clone());
        index.documents.insert(doc.id.clone(), doc);
    }

    fn remove_locked(index: &mut SearchIndex, id: &str) -> bool {
        let Some(doc) = index.documents.remove(id) else {
            return false;
        };
        index.records.remove(id);

        let concrete_fields: Vec<Field> = doc
            .field_lengths
            .keys()
            .copied()
            .filter(|f| *f != Field::All)
            .collect();

        for term in doc.term_frequencies.keys() {
            if let Some(list) = index.inverted_index.get_mut(term) {
                list.remove(id);
                if list.is_empty() {
                    index.inverted_index.remove(term);
                }
            }
            for &field in &concrete_fields {
                let mut field_emptied = false;
                if let Some(terms) = index.field_index.get_mut(&field) {
                    if let Some(list) = terms.get_mut(term) {
                        list.remove(id);
                        if list.is_empty() {
                            terms.remove(term);
                        }
                    }
                    field_emptied = terms.is_empty();
                }
                if field_emptied {
                    index.field_index.remove(&field);
                }
            }
        }
        true
    }

    fn recompute_locked(index: &mut SearchIndex) {
        let term_count = index.inverted_index.len();
        let documents: Vec<&IndexedDocument> = index.documents.values().collect();
        let mut metadata = index.metadata.clone();
        metadata.recompute(documents.into_iter(), term_count);
        index.metadata = metadata;
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// TF-IDF for a term in a document: `(1 + ln tf) × ln(N / df)`
    ///
    /// Returns 0 when the term has no posting for the document. The input
    /// is stemmed before lookup, like every index key.
    pub fn tf_idf(&self, term: &str, document_id: &str) -> f32 {
        let index = self.index.read();
        let stemmed = stem(term);
        let n = index.documents.len();
        let Some(list) = index.inverted_index.get(&stemmed) else {
            return 0.0;
        };
        let Some(posting) = list.get(document_id) else {
            return 0.0;
        };
        let df = list.document_frequency;
        if n == 0 || df == 0 {
            return 0.0;
        }
        (1.0 + (posting.term_frequency as f32).ln()) * (n as f32 / df as f32).ln()
    }

    /// Global posting list for a term (stemmed before lookup).
    pub fn posting_list(&self, term: &str) -> Option<PostingList> {
        self.index.read().inverted_index.get(&stem(term)).cloned()
    }

    /// Field-scoped posting list for a term (stemmed before lookup).
    pub fn field_posting_list(&self, field: Field, term: &str) -> Option<PostingList> {
        self.index
            .read()
            .field_index
            .get(&field)
            .and_then(|terms| terms.get(&stem(term)))
            .cloned()
    }

    /// All stemmed terms in the global index.
    pub fn vocabulary(&self) -> Vec<String> {
        self.index.read().inverted_index.keys().cloned().collect()
    }

    /// Source record for a document id.
    pub fn record(&self, id: &str) -> Option<RepoRecord> {
        self.index.read().records.get(id).cloned()
    }

    /// Number of indexed documents.
    pub fn document_count(&self) -> usize {
        self.index.read().documents.len()
    }

    /// Snapshot of the corpus statistics.
    pub fn metadata(&self) -> IndexMetadata {
        self.index.read().metadata.clone()
    }

    /// Run a closure against the index under the read lock
    ///
    /// The engine's scoring loop uses this to avoid cloning posting lists
    /// per clause. The closure must not block.
    pub fn read<R>(&self, f: impl FnOnce(&SearchIndex) -> R) -> R {
        f(&self.index.read())
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Self-contained structural snapshot of the whole index.
    pub fn serialize(&self) -> Result<serde_json::Value> {
        snapshot::to_value(&self.index.read())
    }

    /// Restore from a snapshot
    ///
    /// A failed restore leaves an empty, consistent index and reports the
    /// error; it never leaves a partially-restored state.
    pub fn deserialize(&self, value: serde_json::Value) -> Result<()> {
        match snapshot::from_value(value) {
            Ok(restored) => {
                *self.index.write() = restored;
                self.ready.store(true, Ordering::Release);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "snapshot restore failed, falling back to empty index");
                *self.index.write() = SearchIndex::default();
                self.ready.store(false, Ordering::Release);
                Err(e)
            }
        }
    }
}
