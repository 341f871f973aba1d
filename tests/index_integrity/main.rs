//! Index structural invariants: posting-list consistency across
//! mutations, update idempotence, snapshot round trips, and metadata
//! bookkeeping.

#[path = "../common/mod.rs"]
mod common;

use common::*;
use starsearch::SNAPSHOT_VERSION;

// ============================================================================
// Posting-list integrity
// ============================================================================

#[test]
fn document_frequency_tracks_posting_count() {
    let index = corpus_index();
    index.read(|idx| {
        for list in idx.inverted_index.values() {
            assert_eq!(list.document_frequency, list.postings.len());
            assert!(!list.postings.is_empty(), "empty lists must be pruned");
        }
        for field_terms in idx.field_index.values() {
            for list in field_terms.values() {
                assert_eq!(list.document_frequency, list.postings.len());
                assert!(!list.postings.is_empty());
            }
        }
    });
}

#[test]
fn removal_decrements_df_and_prunes_empty_lists() {
    let index = corpus_index();

    let df_before = index
        .posting_list("json")
        .map(|l| l.document_frequency)
        .unwrap();
    assert_eq!(df_before, 2);

    assert!(index.remove_document("2").unwrap());

    let df_after = index
        .posting_list("json")
        .map(|l| l.document_frequency)
        .unwrap();
    assert_eq!(df_after, 1);

    // "utilities" only occurred in document 2
    assert!(index.posting_list("utilities").is_none());
    index.read(|idx| {
        for field_terms in idx.field_index.values() {
            for list in field_terms.values() {
                assert!(list.get("2").is_none());
            }
        }
    });
}

#[test]
fn removing_unknown_document_is_a_no_op() {
    let index = corpus_index();
    assert!(!index.remove_document("999").unwrap());
    assert_eq!(index.document_count(), 3);
}

#[test]
fn removing_last_document_leaves_empty_consistent_index() {
    init_tracing();
    let index = std::sync::Arc::new(starsearch::IndexManager::new(
        starsearch::IndexingConfig::default(),
    ));
    index.build_index(&json_corpus()[..1]).unwrap();
    assert!(index.remove_document("1").unwrap());

    assert_eq!(index.document_count(), 0);
    index.read(|idx| {
        assert!(idx.inverted_index.is_empty());
        assert!(idx.field_index.is_empty());
        assert_eq!(idx.metadata.document_count, 0);
    });
}

// ============================================================================
// Updates
// ============================================================================

#[test]
fn update_is_idempotent() {
    let index = corpus_index();
    let record = &json_corpus()[0];

    let df_before: Vec<(String, usize)> = index.read(|idx| {
        let mut dfs: Vec<(String, usize)> = idx
            .inverted_index
            .iter()
            .map(|(t, l)| (t.clone(), l.document_frequency))
            .collect();
        dfs.sort_unstable();
        dfs
    });

    index.update_document(record).unwrap();
    index.update_document(record).unwrap();

    let df_after: Vec<(String, usize)> = index.read(|idx| {
        let mut dfs: Vec<(String, usize)> = idx
            .inverted_index
            .iter()
            .map(|(t, l)| (t.clone(), l.document_frequency))
            .collect();
        dfs.sort_unstable();
        dfs
    });

    assert_eq!(df_before, df_after);
    assert_eq!(index.document_count(), 3);
}

#[test]
fn update_reflects_changed_content() {
    let index = corpus_index();
    let mut record = json_corpus()[0].clone();
    record.description = Some("A YAML serializer".to_string());
    index.update_document(&record).unwrap();

    assert!(index.posting_list("yaml").is_some());
    // "blazing" only appeared in the old description
    assert!(index.posting_list("blazing").is_none());
}

// ============================================================================
// Scoring primitives
// ============================================================================

#[test]
fn tf_idf_is_zero_for_absent_pairs() {
    let index = corpus_index();
    assert_eq!(index.tf_idf("json", "3"), 0.0);
    assert_eq!(index.tf_idf("nonexistent", "1"), 0.0);
}

#[test]
fn tf_idf_rewards_rarity() {
    let index = corpus_index();
    // "blazing" appears in one document, "json" in two
    let rare = index.tf_idf("blazing", "1");
    let common = index.tf_idf("json", "1");
    assert!(common > 0.0);
    assert!(
        rare > common,
        "a df=1 term must outscore a df=2 term despite lower tf"
    );
}

// ============================================================================
// Snapshots
// ============================================================================

#[test]
fn snapshot_round_trip_preserves_probe_queries() {
    let index = corpus_index();
    let snapshot = index.serialize().unwrap();
    assert_eq!(snapshot["version"], SNAPSHOT_VERSION);

    let restored = starsearch::IndexManager::new(starsearch::IndexingConfig::default());
    restored.deserialize(snapshot).unwrap();

    assert!(restored.is_ready());
    assert_eq!(restored.document_count(), index.document_count());
    for term in ["json", "par", "xml"] {
        let before = index.posting_list(term).map(|l| l.document_frequency);
        let after = restored.posting_list(term).map(|l| l.document_frequency);
        assert_eq!(before, after, "df mismatch for probe term {term}");
    }
}

#[test]
fn corrupt_snapshot_resets_to_empty_index() {
    init_tracing();
    let index = corpus_index();
    let err = index.deserialize(serde_json::json!({"version": 99, "index": {}}));
    assert!(err.is_err());
    assert!(!index.is_ready());
    assert_eq!(index.document_count(), 0);
}

// ============================================================================
// Metadata and capacity
// ============================================================================

#[test]
fn metadata_tracks_mutations() {
    let index = corpus_index();
    let meta = index.metadata();
    assert_eq!(meta.document_count, 3);
    assert!(meta.term_count > 0);
    assert!(meta.avg_document_length > 0.0);

    index.remove_document("1").unwrap();
    let meta = index.metadata();
    assert_eq!(meta.document_count, 2);
}

#[test]
fn build_index_respects_max_documents() {
    init_tracing();
    let config = starsearch::IndexingConfig {
        max_documents: 10,
        ..Default::default()
    };
    let index = starsearch::IndexManager::new(config);
    index.build_index(&wide_corpus(25)).unwrap();
    assert_eq!(index.document_count(), 10);
}

#[test]
fn rebuild_replaces_previous_contents() {
    let index = corpus_index();
    index.build_index(&wide_corpus(5)).unwrap();
    assert_eq!(index.document_count(), 5);
    assert!(index.record("1").is_some());
    assert!(index.posting_list("blazing").is_none());
}
