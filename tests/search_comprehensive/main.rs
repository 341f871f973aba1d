//! End-to-end search scenarios through the unified engine:
//! ranking, query-language clauses, filters, sorting, pagination,
//! highlighting, and the explain trace.

#[path = "../common/mod.rs"]
mod common;

use common::*;
use starsearch::{QueryType, SuggestionKind};

// ============================================================================
// Ranking
// ============================================================================

#[test]
fn json_parser_ranks_dual_match_first() {
    let engine = corpus_engine();
    let results = engine.search(&SearchQuery::keyword("json parser")).unwrap();

    assert_eq!(results.total, 3);
    assert_eq!(results.hits[0].repository.name, "fast-json");
    for pair in results.hits.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn top_hit_has_full_confidence() {
    let engine = corpus_engine();
    let results = engine.search(&SearchQuery::keyword("json")).unwrap();
    assert!((results.hits[0].metadata.confidence - 1.0).abs() < 1e-6);
    for hit in &results.hits[1..] {
        assert!(hit.metadata.confidence <= 1.0);
    }
}

#[test]
fn query_matching_is_case_insensitive_by_default() {
    let engine = corpus_engine();
    let lower = engine.search(&SearchQuery::keyword("json")).unwrap();
    let upper = engine.search(&SearchQuery::keyword("JSON")).unwrap();
    assert_eq!(lower.total, upper.total);
}

// ============================================================================
// Query language
// ============================================================================

#[test]
fn phrase_clause_requires_every_word() {
    let engine = corpus_engine();
    let results = engine
        .search(&SearchQuery::keyword("\"blazing fast\""))
        .unwrap();
    assert_eq!(results.total, 1);
    assert_eq!(results.hits[0].repository.name, "fast-json");
}

#[test]
fn field_clause_scopes_matching() {
    let engine = corpus_engine();
    let results = engine
        .search(&SearchQuery::keyword("language:rust"))
        .unwrap();
    assert_eq!(results.total, 2);
    for hit in &results.hits {
        assert_eq!(hit.repository.language.as_deref(), Some("Rust"));
    }
}

#[test]
fn range_clause_filters_by_stars() {
    let engine = corpus_engine();
    let results = engine.search(&SearchQuery::keyword("stars:>=500")).unwrap();
    assert_eq!(results.total, 2);
    for hit in &results.hits {
        assert!(hit.repository.stargazers_count >= 500);
    }
}

#[test]
fn wildcard_clause_expands_over_vocabulary() {
    let engine = corpus_engine();
    let results = engine.search(&SearchQuery::keyword("par*")).unwrap();
    assert_eq!(results.total, 2);
    let names: Vec<&str> = results
        .hits
        .iter()
        .map(|h| h.repository.name.as_str())
        .collect();
    assert!(names.contains(&"fast-json"));
    assert!(names.contains(&"slow-xml"));
}

#[test]
fn fuzzy_clause_recovers_single_typo() {
    let engine = corpus_engine();
    let results = engine.search(&SearchQuery::keyword("jsn~2")).unwrap();
    assert!(results.total >= 2);
    assert!(results
        .hits
        .iter()
        .any(|h| h.repository.name == "fast-json"));
}

#[test]
fn not_operator_subtracts_documents() {
    let engine = corpus_engine();
    let results = engine
        .search(&SearchQuery::keyword("parser NOT xml"))
        .unwrap();
    assert_eq!(results.total, 1);
    assert_eq!(results.hits[0].repository.name, "fast-json");
}

#[test]
fn and_operator_intersects_documents() {
    let engine = corpus_engine();
    let results = engine
        .search(&SearchQuery::keyword("json AND utilities"))
        .unwrap();
    assert_eq!(results.total, 1);
    assert_eq!(results.hits[0].repository.name, "json-tools");
}

#[test]
fn unknown_range_field_fails_loudly() {
    let engine = corpus_engine();
    let err = engine
        .search(&SearchQuery::keyword("velocity:>100"))
        .unwrap_err();
    assert_eq!(err.code(), "FIELD_NOT_FOUND");
}

#[test]
fn unknown_field_clause_fails_loudly() {
    let engine = corpus_engine();
    let err = engine
        .search(&SearchQuery::keyword("flavor:spicy"))
        .unwrap_err();
    assert_eq!(err.code(), "FIELD_NOT_FOUND");
}

// ============================================================================
// Filters
// ============================================================================

#[test]
fn min_stars_filter_excludes_low_scoring_matches() {
    let engine = corpus_engine();
    let filters = SearchFilters {
        min_stars: Some(100),
        ..SearchFilters::none()
    };
    let results = engine
        .search(&SearchQuery::keyword("json").with_filters(filters))
        .unwrap();
    assert_eq!(results.total, 1);
    assert_eq!(results.hits[0].repository.name, "fast-json");
}

#[test]
fn language_filter_is_case_insensitive() {
    let engine = corpus_engine();
    let filters = SearchFilters {
        language: Some("RUST".to_string()),
        ..SearchFilters::none()
    };
    let results = engine
        .search(&SearchQuery::keyword("parser").with_filters(filters))
        .unwrap();
    assert_eq!(results.total, 2);
}

#[test]
fn archived_repositories_can_be_excluded() {
    init_tracing();
    let mut archived = repo(
        9,
        "old-json",
        "Archived JSON helpers",
        &["json"],
        "octocat",
        Some("Rust"),
        50,
    );
    archived.archived = true;

    let engine = UnifiedSearchEngine::new(EngineConfig::default());
    let mut records = json_corpus();
    records.push(archived);
    engine.index_repositories(&records).unwrap();

    let all = engine.search(&SearchQuery::keyword("json")).unwrap();
    assert_eq!(all.total, 3);

    let filters = SearchFilters {
        include_archived: false,
        ..SearchFilters::none()
    };
    let active = engine
        .search(&SearchQuery::keyword("json").with_filters(filters))
        .unwrap();
    assert_eq!(active.total, 2);
    assert!(active.hits.iter().all(|h| !h.repository.archived));
}

// ============================================================================
// Sorting and pagination
// ============================================================================

#[test]
fn sort_by_stars_descending() {
    let engine = corpus_engine();
    let options = SearchOptions {
        sort_by: SortBy::Stars,
        sort_order: SortOrder::Desc,
        ..SearchOptions::default()
    };
    let results = engine
        .search(&SearchQuery::keyword("parser").with_options(options))
        .unwrap();
    let stars: Vec<u32> = results
        .hits
        .iter()
        .map(|h| h.repository.stargazers_count)
        .collect();
    assert_eq!(stars, [5000, 500]);
}

#[test]
fn sort_by_name_ascending() {
    let engine = corpus_engine();
    let options = SearchOptions {
        sort_by: SortBy::Name,
        sort_order: SortOrder::Asc,
        ..SearchOptions::default()
    };
    let results = engine
        .search(&SearchQuery::keyword("json").with_options(options))
        .unwrap();
    let names: Vec<&str> = results
        .hits
        .iter()
        .map(|h| h.repository.name.as_str())
        .collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
}

#[test]
fn pagination_slices_after_total_is_counted() {
    init_tracing();
    let engine = UnifiedSearchEngine::new(EngineConfig::default());
    engine.index_repositories(&wide_corpus(30)).unwrap();

    let options = SearchOptions {
        limit: 10,
        offset: 25,
        ..SearchOptions::default()
    };
    let results = engine
        .search(&SearchQuery::keyword("json").with_options(options))
        .unwrap();
    assert_eq!(results.total, 30);
    assert_eq!(results.hits.len(), 5);
}

#[test]
fn limit_is_clamped_to_configured_maximum() {
    init_tracing();
    let engine = UnifiedSearchEngine::new(EngineConfig::default());
    engine.index_repositories(&wide_corpus(150)).unwrap();

    let options = SearchOptions {
        limit: 100_000,
        ..SearchOptions::default()
    };
    let results = engine
        .search(&SearchQuery::keyword("json").with_options(options))
        .unwrap();
    assert_eq!(results.total, 150);
    assert!(results.hits.len() <= EngineConfig::default().search.max_limit);
}

// ============================================================================
// Highlights
// ============================================================================

#[test]
fn highlights_point_into_raw_field_text() {
    let engine = corpus_engine();
    let results = engine.search(&SearchQuery::keyword("json")).unwrap();
    let top = &results.hits[0];

    assert!(!top.matches.is_empty());
    for m in &top.matches {
        let text = top.repository.field_text(m.field).unwrap();
        for span in &m.highlights {
            assert!(span.end <= text.len());
            assert_eq!(&text[span.start..span.end], span.text);
        }
    }
    assert!(top
        .metadata
        .matched_fields
        .iter()
        .any(|f| *f == starsearch::Field::Name));
}

// ============================================================================
// Validation and dispatch
// ============================================================================

#[test]
fn empty_query_text_is_invalid() {
    let engine = corpus_engine();
    let err = engine.search(&SearchQuery::keyword("  ")).unwrap_err();
    assert_eq!(err.code(), "INVALID_QUERY");
}

#[test]
fn semantic_queries_are_not_supported() {
    let engine = corpus_engine();
    let mut query = SearchQuery::keyword("json");
    query.query_type = QueryType::Semantic;
    let err = engine.search(&query).unwrap_err();
    assert_eq!(err.code(), "INVALID_QUERY");
}

#[test]
fn search_before_indexing_reports_not_ready() {
    init_tracing();
    let engine = UnifiedSearchEngine::new(EngineConfig::default());
    let err = engine.search(&SearchQuery::keyword("json")).unwrap_err();
    assert_eq!(err.code(), "INDEX_NOT_READY");
}

// ============================================================================
// Explain
// ============================================================================

#[test]
fn explain_traces_the_pipeline_in_order() {
    let engine = corpus_engine();
    let trace = engine
        .explain(&SearchQuery::keyword("json language:rust stars:>100"))
        .unwrap();

    let names: Vec<&str> = trace.steps.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        ["query_parsing", "term_lookup", "scoring", "filtering", "sorting"]
    );
    assert!(trace.steps.iter().all(|s| s.elapsed_ms >= 1));
    assert_eq!(trace.query, "json language:rust stars:>100");
}

// ============================================================================
// Suggestions
// ============================================================================

#[test]
fn suggestions_blend_vocabulary_with_history() {
    let engine = corpus_engine();
    engine.search(&SearchQuery::keyword("json parser")).unwrap();

    let suggestions = engine.suggest("json", 10).unwrap();
    assert!(suggestions
        .iter()
        .any(|s| s.kind == SuggestionKind::Term && s.text == "json"));
    assert!(suggestions
        .iter()
        .any(|s| s.kind == SuggestionKind::History && s.text == "json parser"));
}
