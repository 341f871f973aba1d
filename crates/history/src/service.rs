//! Search history log, popular terms, and history-derived suggestions

use crate::entry::{HistoryEntry, TermStats};
use chrono::Utc;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use starsearch_core::{Result, SearchSuggestion, SnapshotStore, SuggestionKind};
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, warn};

/// Oldest entries are evicted past this many
const HISTORY_CAP: usize = 100;
/// Popular-term table keeps the top N by frequency
const POPULAR_CAP: usize = 100;
/// Terms shorter than this never enter the popular table
const MIN_TERM_LEN: usize = 3;
/// History suggestion scores decay by e^(-hours / this)
const DECAY_HOURS: f32 = 168.0;

const HISTORY_KEY: &str = "search_history";
const STATS_KEY: &str = "search_stats";

#[derive(Debug, Default, Serialize, Deserialize)]
struct HistoryState {
    entries: VecDeque<HistoryEntry>,
    term_stats: FxHashMap<String, TermStats>,
}

/// Capped search history log with popular-term tracking, persisted
/// through a [`SnapshotStore`].
pub struct SearchHistoryService {
    store: Arc<dyn SnapshotStore>,
    state: RwLock<HistoryState>,
}

impl SearchHistoryService {
    /// Create a service backed by `store`, restoring any persisted
    /// history. Missing or corrupt records start the service empty.
    pub fn new(store: Arc<dyn SnapshotStore>) -> Self {
        let state = Self::load(store.as_ref());
        SearchHistoryService {
            store,
            state: RwLock::new(state),
        }
    }

    fn load(store: &dyn SnapshotStore) -> HistoryState {
        let mut state = HistoryState::default();
        match store.get(HISTORY_KEY) {
            Ok(Some(value)) => match serde_json::from_value(value) {
                Ok(entries) => state.entries = entries,
                Err(error) => warn!(%error, "discarding corrupt search history record"),
            },
            Ok(None) => {}
            Err(error) => warn!(%error, "failed to load search history"),
        }
        match store.get(STATS_KEY) {
            Ok(Some(value)) => match serde_json::from_value(value) {
                Ok(stats) => state.term_stats = stats,
                Err(error) => warn!(%error, "discarding corrupt search stats record"),
            },
            Ok(None) => {}
            Err(error) => warn!(%error, "failed to load search stats"),
        }
        state
    }

    // ========================================================================
    // Recording
    // ========================================================================

    /// Append an entry, update popular terms, and persist both records.
    pub fn record(&self, entry: HistoryEntry) -> Result<()> {
        let (history_value, stats_value) = {
            let mut state = self.state.write();

            for term in significant_terms(&entry.query) {
                let stats = state.term_stats.entry(term).or_insert(TermStats {
                    count: 0,
                    last_used: entry.timestamp,
                });
                stats.count += 1;
                stats.last_used = entry.timestamp;
            }
            if state.term_stats.len() > POPULAR_CAP {
                let mut ranked: Vec<(String, u32)> = state
                    .term_stats
                    .iter()
                    .map(|(t, s)| (t.clone(), s.count))
                    .collect();
                ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
                for (term, _) in ranked.into_iter().skip(POPULAR_CAP) {
                    state.term_stats.remove(&term);
                }
            }

            state.entries.push_back(entry);
            while state.entries.len() > HISTORY_CAP {
                state.entries.pop_front();
            }

            (
                serde_json::to_value(&state.entries)?,
                serde_json::to_value(&state.term_stats)?,
            )
        };

        self.store.put(HISTORY_KEY, history_value)?;
        self.store.put(STATS_KEY, stats_value)?;
        debug!("search history updated");
        Ok(())
    }

    /// Most recent entries, newest first, at most `limit`.
    pub fn recent(&self, limit: usize) -> Vec<HistoryEntry> {
        self.state
            .read()
            .entries
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect()
    }

    /// Number of entries currently in the log.
    pub fn len(&self) -> usize {
        self.state.read().entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.state.read().entries.is_empty()
    }

    /// Drop all history and remove the persisted records.
    pub fn clear(&self) -> Result<()> {
        {
            let mut state = self.state.write();
            state.entries.clear();
            state.term_stats.clear();
        }
        self.store.remove(HISTORY_KEY)?;
        self.store.remove(STATS_KEY)?;
        Ok(())
    }

    // ========================================================================
    // Suggestions
    // ========================================================================

    /// Blend past queries containing the input with popular terms,
    /// deduplicated by text, best score first.
    pub fn suggest(&self, input: &str, limit: usize) -> Vec<SearchSuggestion> {
        let needle = input.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let now = Utc::now();
        let state = self.state.read();
        let mut by_text: FxHashMap<String, SearchSuggestion> = FxHashMap::default();

        for entry in state.entries.iter().rev() {
            let query_lc = entry.query.to_lowercase();
            if !query_lc.contains(&needle) {
                continue;
            }
            let base = if query_lc.starts_with(&needle) { 1.0 } else { 0.8 };
            let hours = (now - entry.timestamp).num_minutes() as f32 / 60.0;
            let decay = (-hours.max(0.0) / DECAY_HOURS).exp();
            let bonus = entry.result_count.min(10) as f32 * 0.01;
            let score = base * decay + bonus;

            let candidate = SearchSuggestion {
                text: entry.query.clone(),
                kind: SuggestionKind::History,
                score,
                frequency: None,
                last_used: Some(entry.timestamp),
            };
            merge_suggestion(&mut by_text, candidate);
        }

        for (term, stats) in &state.term_stats {
            let relevance = if *term == needle {
                1.0
            } else if term.starts_with(&needle) {
                0.8
            } else if term.contains(&needle) {
                0.5
            } else {
                0.2
            };
            let candidate = SearchSuggestion {
                text: term.clone(),
                kind: SuggestionKind::Popular,
                score: stats.count as f32 * relevance,
                frequency: Some(stats.count),
                last_used: Some(stats.last_used),
            };
            merge_suggestion(&mut by_text, candidate);
        }

        let mut suggestions: Vec<SearchSuggestion> = by_text.into_values().collect();
        suggestions.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.text.cmp(&b.text))
        });
        suggestions.truncate(limit);
        suggestions
    }
}

/// Query tokens worth tracking as popular terms: at least three
/// characters, not an operator word, not field-qualified.
fn significant_terms(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .map(str::to_lowercase)
        .filter(|t| {
            t.len() >= MIN_TERM_LEN
                && !t.contains(':')
                && !matches!(t.as_str(), "and" | "or" | "not")
        })
        .collect()
}

fn merge_suggestion(
    by_text: &mut FxHashMap<String, SearchSuggestion>,
    candidate: SearchSuggestion,
) {
    match by_text.get_mut(&candidate.text) {
        Some(existing) if existing.score >= candidate.score => {}
        Some(existing) => *existing = candidate,
        None => {
            by_text.insert(candidate.text.clone(), candidate);
        }
    }
}
