//! History recording and suggestion blending through the unified
//! engine, including persistence across engine instances.

#[path = "../common/mod.rs"]
mod common;

use common::*;
use starsearch::{MemoryStore, SnapshotStore, SuggestionKind};
use std::sync::Arc;

// ============================================================================
// Recording
// ============================================================================

#[test]
fn every_search_lands_in_history() {
    let engine = corpus_engine();
    engine.search(&SearchQuery::keyword("json")).unwrap();
    engine.search(&SearchQuery::keyword("parser")).unwrap();

    let recent = engine.history().recent(10);
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].query, "parser");
    assert_eq!(recent[1].query, "json");
    assert!(recent.iter().all(|e| e.error.is_none()));
}

#[test]
fn failed_searches_are_recorded_with_error_text() {
    let engine = corpus_engine();
    let err = engine
        .search(&SearchQuery::keyword("velocity:>9000"))
        .unwrap_err();

    let recent = engine.history().recent(1);
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].result_count, 0);
    assert_eq!(recent[0].error.as_deref(), Some(err.to_string().as_str()));
}

#[test]
fn history_records_result_counts_and_filters() {
    let engine = corpus_engine();
    let filters = SearchFilters {
        min_stars: Some(100),
        ..SearchFilters::none()
    };
    engine
        .search(&SearchQuery::keyword("json").with_filters(filters.clone()))
        .unwrap();

    let entry = &engine.history().recent(1)[0];
    assert_eq!(entry.result_count, 1);
    assert_eq!(entry.filters, filters);
}

// ============================================================================
// Suggestions
// ============================================================================

#[test]
fn vocabulary_suggestions_prefer_prefix_matches() {
    let engine = corpus_engine();
    let suggestions = engine.suggest("pa", 5).unwrap();
    assert!(!suggestions.is_empty());
    assert!(suggestions[0].text.starts_with("pa"));
}

#[test]
fn history_suggestions_surface_past_queries() {
    let engine = corpus_engine();
    engine
        .search(&SearchQuery::keyword("json parser language:rust"))
        .unwrap();

    let suggestions = engine.suggest("json", 10).unwrap();
    assert!(suggestions
        .iter()
        .any(|s| s.kind == SuggestionKind::History
            && s.text == "json parser language:rust"));
}

#[test]
fn popular_terms_accumulate_frequency() {
    let engine = corpus_engine();
    for _ in 0..3 {
        engine.search(&SearchQuery::keyword("json parser")).unwrap();
    }

    let suggestions = engine.suggest("parser", 10).unwrap();
    let popular = suggestions
        .iter()
        .find(|s| s.kind == SuggestionKind::Popular && s.text == "parser")
        .expect("repeated term should become popular");
    assert_eq!(popular.frequency, Some(3));
}

#[test]
fn field_clauses_never_become_popular_terms() {
    let engine = corpus_engine();
    engine
        .search(&SearchQuery::keyword("json language:rust"))
        .unwrap();

    let suggestions = engine.suggest("language", 20).unwrap();
    assert!(suggestions
        .iter()
        .all(|s| s.kind != SuggestionKind::Popular || !s.text.contains(':')));
}

#[test]
fn merged_suggestions_are_deduplicated_and_sorted() {
    let engine = corpus_engine();
    engine.search(&SearchQuery::keyword("json")).unwrap();

    let suggestions = engine.suggest("json", 10).unwrap();
    let mut texts: Vec<&str> = suggestions.iter().map(|s| s.text.as_str()).collect();
    texts.sort_unstable();
    texts.dedup();
    assert_eq!(texts.len(), suggestions.len(), "duplicate suggestion text");
    for pair in suggestions.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn suggestion_limit_is_honored() {
    init_tracing();
    let engine = UnifiedSearchEngine::new(EngineConfig::default());
    engine.index_repositories(&wide_corpus(50)).unwrap();
    let suggestions = engine.suggest("repo", 5).unwrap();
    assert!(suggestions.len() <= 5);
}

// ============================================================================
// Persistence
// ============================================================================

#[test]
fn history_survives_engine_restart() {
    init_tracing();
    let store: Arc<MemoryStore> = Arc::new(MemoryStore::default());
    {
        let engine = UnifiedSearchEngine::with_store(EngineConfig::default(), store.clone());
        engine.index_repositories(&json_corpus()).unwrap();
        engine.search(&SearchQuery::keyword("json parser")).unwrap();
    }

    let revived = UnifiedSearchEngine::with_store(EngineConfig::default(), store);
    assert_eq!(revived.history().recent(1)[0].query, "json parser");
    let suggestions = revived.suggest("json", 10).unwrap();
    assert!(suggestions
        .iter()
        .any(|s| s.kind == SuggestionKind::History));
}

#[test]
fn corrupt_history_record_starts_empty() {
    init_tracing();
    let store: Arc<MemoryStore> = Arc::new(MemoryStore::default());
    store
        .put("search_history", serde_json::json!(42))
        .unwrap();

    let engine = UnifiedSearchEngine::with_store(EngineConfig::default(), store);
    assert!(engine.history().is_empty());
}
