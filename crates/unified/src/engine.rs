//! The orchestrator: validation, dispatch, history recording, blended
//! suggestions, and index snapshot persistence.

use rustc_hash::FxHashMap;
use starsearch_core::{
    EngineConfig, ExplainTrace, QueryType, RepoRecord, Result, SearchError, SearchQuery,
    SearchResults, SearchSuggestion, SnapshotStore,
};
use starsearch_engine::KeywordSearchEngine;
use starsearch_history::{HistoryEntry, SearchHistoryService};
use starsearch_index::IndexManager;
use std::sync::Arc;
use std::time::Instant;
use tracing::warn;

/// Queries longer than this are rejected before dispatch
const MAX_QUERY_LEN: usize = 1000;
/// Store key for the persisted index snapshot
const INDEX_KEY: &str = "index_snapshot";

/// Front door over the index, keyword engine, and history service.
///
/// Constructed explicitly and owned by the caller; no global instance.
/// Pass a [`SnapshotStore`] via [`with_store`](Self::with_store) to
/// persist the index and search history, or use [`new`](Self::new) for
/// a purely in-memory engine.
pub struct UnifiedSearchEngine {
    config: EngineConfig,
    index: Arc<IndexManager>,
    engine: KeywordSearchEngine,
    history: SearchHistoryService,
    store: Arc<dyn SnapshotStore>,
}

impl UnifiedSearchEngine {
    /// Engine with in-memory storage.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_store(
            config,
            Arc::new(starsearch_core::MemoryStore::default()),
        )
    }

    /// Engine persisting through `store`, restoring any saved history.
    pub fn with_store(config: EngineConfig, store: Arc<dyn SnapshotStore>) -> Self {
        let index = Arc::new(IndexManager::new(config.indexing.clone()));
        let engine = KeywordSearchEngine::new(index.clone(), config.clone());
        let history = SearchHistoryService::new(store.clone());
        UnifiedSearchEngine {
            config,
            index,
            engine,
            history,
            store,
        }
    }

    // ========================================================================
    // Indexing
    // ========================================================================

    /// Replace the index contents with `records`.
    pub fn index_repositories(&self, records: &[RepoRecord]) -> Result<()> {
        self.index.build_index(records)
    }

    /// Index or re-index a single repository.
    pub fn add_repository(&self, record: &RepoRecord) -> Result<()> {
        self.index.add_document(record)
    }

    /// Re-analyze an already-indexed repository.
    pub fn update_repository(&self, record: &RepoRecord) -> Result<()> {
        self.index.update_document(record)
    }

    /// Remove a repository by document id. Returns whether it existed.
    pub fn remove_repository(&self, document_id: &str) -> Result<bool> {
        self.index.remove_document(document_id)
    }

    /// Whether the index has been built or restored.
    pub fn is_ready(&self) -> bool {
        self.index.is_ready()
    }

    /// The underlying index manager.
    pub fn index(&self) -> &Arc<IndexManager> {
        &self.index
    }

    /// The search history service.
    pub fn history(&self) -> &SearchHistoryService {
        &self.history
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Validate, dispatch, and record a search.
    ///
    /// Every non-empty-text attempt lands in history, failures
    /// included; a history-write failure is logged and swallowed so it
    /// never masks the search's own outcome.
    pub fn search(&self, query: &SearchQuery) -> Result<SearchResults> {
        if query.text.trim().is_empty() {
            return Err(SearchError::InvalidQuery {
                reason: "query text is empty".to_string(),
            });
        }

        let started = Instant::now();
        let outcome = self.dispatch(query);
        let elapsed_ms = started.elapsed().as_millis() as u64;

        let entry = match &outcome {
            Ok(results) => HistoryEntry::success(
                query.text.clone(),
                results.total,
                elapsed_ms,
                query.filters.clone(),
            ),
            Err(error) => HistoryEntry::failure(
                query.text.clone(),
                error.to_string(),
                elapsed_ms,
                query.filters.clone(),
            ),
        };
        if let Err(error) = self.history.record(entry) {
            warn!(%error, "failed to record search history");
        }

        outcome
    }

    fn dispatch(&self, query: &SearchQuery) -> Result<SearchResults> {
        if query.text.chars().count() > MAX_QUERY_LEN {
            return Err(SearchError::InvalidQuery {
                reason: format!("query text exceeds {MAX_QUERY_LEN} characters"),
            });
        }

        match query.query_type {
            // hybrid is a placeholder alias for keyword
            QueryType::Keyword | QueryType::Hybrid => {
                let mut query = query.clone();
                if query.options.limit == 0 {
                    query.options.limit = self.config.search.default_limit;
                }
                query.options.limit = query.options.limit.min(self.config.search.max_limit);
                self.engine.search(&query)
            }
            QueryType::Semantic => Err(SearchError::InvalidQuery {
                reason: "semantic search is not available".to_string(),
            }),
            QueryType::Conversational => Err(SearchError::InvalidQuery {
                reason: "conversational search is not available".to_string(),
            }),
        }
    }

    /// Execution trace for a query, without touching history.
    pub fn explain(&self, query: &SearchQuery) -> Result<ExplainTrace> {
        self.engine.explain(query)
    }

    // ========================================================================
    // Suggestions
    // ========================================================================

    /// Vocabulary and history suggestions merged, deduplicated by text
    /// (best score wins), sorted, and truncated to `limit`.
    pub fn suggest(&self, input: &str, limit: usize) -> Result<Vec<SearchSuggestion>> {
        let mut by_text: FxHashMap<String, SearchSuggestion> = FxHashMap::default();
        for suggestion in self
            .engine
            .suggest(input, limit)?
            .into_iter()
            .chain(self.history.suggest(input, limit))
        {
            match by_text.get_mut(&suggestion.text) {
                Some(existing) if existing.score >= suggestion.score => {}
                Some(existing) => *existing = suggestion,
                None => {
                    by_text.insert(suggestion.text.clone(), suggestion);
                }
            }
        }

        let mut merged: Vec<SearchSuggestion> = by_text.into_values().collect();
        merged.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.text.cmp(&b.text))
        });
        merged.truncate(limit);
        Ok(merged)
    }

    // ========================================================================
    // Snapshot persistence
    // ========================================================================

    /// Persist a structural snapshot of the index.
    pub fn save_index(&self) -> Result<()> {
        let snapshot = self.index.serialize()?;
        self.store.put(INDEX_KEY, snapshot)
    }

    /// Restore the index from a persisted snapshot. Returns `false`
    /// when no snapshot exists.
    pub fn restore_index(&self) -> Result<bool> {
        match self.store.get(INDEX_KEY)? {
            Some(snapshot) => {
                self.index.deserialize(snapshot)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
