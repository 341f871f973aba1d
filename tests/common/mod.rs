//! Shared test utilities for all integration test suites.
//!
//! Import via `mod common;` from any test's main.rs.

#![allow(dead_code)]
#![allow(unused_imports)]

use chrono::{DateTime, TimeZone, Utc};
use std::sync::Once;
pub use starsearch::{
    EngineConfig, Field, IndexManager, IndexingConfig, KeywordSearchEngine, RepoOwner, RepoRecord,
    SearchFilters, SearchOptions, SearchQuery, SortBy, SortOrder, UnifiedSearchEngine,
};
use std::sync::Arc;

// ============================================================================
// Initialization
// ============================================================================

static INIT_TRACING: Once = Once::new();

/// Route tracing output through the test harness capture.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "warn".into()),
            )
            .with_test_writer()
            .try_init();
    });
}

// ============================================================================
// Corpus builders
// ============================================================================

fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

/// Fully-populated record builder for search scenarios.
#[allow(clippy::too_many_arguments)]
pub fn repo(
    id: u64,
    name: &str,
    description: &str,
    topics: &[&str],
    owner: &str,
    language: Option<&str>,
    stars: u32,
) -> RepoRecord {
    RepoRecord {
        id,
        name: name.to_string(),
        description: Some(description.to_string()),
        topics: topics.iter().map(|t| t.to_string()).collect(),
        owner: RepoOwner {
            login: owner.to_string(),
        },
        language: language.map(|l| l.to_string()),
        stargazers_count: stars,
        forks_count: stars / 10,
        open_issues_count: stars / 100,
        created_at: date(2020, 6, 15),
        updated_at: date(2024, 6, 15),
        pushed_at: date(2024, 6, 15),
        archived: false,
        fork: false,
    }
}

/// The three-record corpus most scenarios are written against.
pub fn json_corpus() -> Vec<RepoRecord> {
    vec![
        repo(
            1,
            "fast-json",
            "A blazing fast JSON parser",
            &["json", "parser", "performance"],
            "serde-rs",
            Some("Rust"),
            500,
        ),
        repo(
            2,
            "json-tools",
            "Utilities for JSON processing",
            &["json", "tooling"],
            "jsonauts",
            Some("Go"),
            10,
        ),
        repo(
            3,
            "slow-xml",
            "An XML parser",
            &["xml", "parser"],
            "markup-dev",
            Some("Rust"),
            5000,
        ),
    ]
}

/// Unified engine pre-loaded with [`json_corpus`].
pub fn corpus_engine() -> UnifiedSearchEngine {
    init_tracing();
    let engine = UnifiedSearchEngine::new(EngineConfig::default());
    engine.index_repositories(&json_corpus()).unwrap();
    engine
}

/// Bare index manager pre-loaded with [`json_corpus`].
pub fn corpus_index() -> Arc<IndexManager> {
    init_tracing();
    let manager = Arc::new(IndexManager::new(IndexingConfig::default()));
    manager.build_index(&json_corpus()).unwrap();
    manager
}

/// A larger synthetic corpus for pagination and suggestion coverage.
pub fn wide_corpus(count: u64) -> Vec<RepoRecord> {
    (1..=count)
        .map(|i| {
            let language = if i % 2 == 0 { "Rust" } else { "TypeScript" };
            repo(
                i,
                &format!("repo-{i}"),
                &format!("A sample json library number {i}"),
                &["json", "library"],
                "octocat",
                Some(language),
                (i as u32) * 10,
            )
        })
        .collect()
}
