//! Keyword search execution
//!
//! Each clause is evaluated independently into a document -> score map;
//! the operator attached to a clause decides how the *next* clause
//! combines with the accumulator: `Or` unions (summing scores), `And`
//! intersects (summing scores), `Not` subtracts the next clause's
//! documents. Operator-free queries therefore stay a soft OR over all
//! clauses. Execution is deadline-bound: the configured search timeout
//! is checked between clause evaluations and before assembly.

use crate::filters;
use crate::highlight::{find_highlights, find_phrase_highlights, merge_spans};
use crate::parser;
use rustc_hash::FxHashMap;
use starsearch_analyzer::{generate_fuzzy_suggestions, levenshtein, normalize, stem};
use starsearch_core::{
    ClauseKind, ClauseOperator, EngineConfig, Field, HighlightKind, ParsedQuery, QueryClause,
    RepoRecord, Result, ResultMetadata, SearchError, SearchMatch, SearchQuery, SearchResult,
    SearchResults, SearchSuggestion, SortBy, SortOrder, SuggestionKind,
};
use starsearch_index::{IndexManager, SearchIndex};
use std::cmp::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Multiplier for phrase clauses on top of the summed word scores
const PHRASE_BONUS: f32 = 1.5;
/// Fixed bonus for explicit field-qualified matches
const FIELD_MATCH_BONUS: f32 = 2.0;
/// Weight of wildcard-expanded term scores
const WILDCARD_WEIGHT: f32 = 0.8;
/// Weight of fuzzy-expanded term scores, before similarity scaling
const FUZZY_WEIGHT: f32 = 0.6;
/// Fuzzy clauses expand to at most this many vocabulary terms
const FUZZY_EXPANSIONS: usize = 5;
/// Flat contribution of a satisfied range clause
const RANGE_SCORE: f32 = 1.0;

type CandidateScores = FxHashMap<String, f32>;

/// Highlight needles collected while evaluating clauses
#[derive(Debug, Default)]
struct Needles {
    /// (field scope, needle); `None` scope applies to every field
    exact: Vec<(Option<Field>, String)>,
    phrases: Vec<String>,
    fuzzy: Vec<String>,
}

/// Query parsing, execution, scoring, highlighting, and suggestions
/// against one index
pub struct KeywordSearchEngine {
    index: Arc<IndexManager>,
    config: EngineConfig,
}

impl KeywordSearchEngine {
    /// Create an engine over a shared index.
    pub fn new(index: Arc<IndexManager>, config: EngineConfig) -> Self {
        KeywordSearchEngine { index, config }
    }

    /// The shared index manager.
    pub fn index(&self) -> &Arc<IndexManager> {
        &self.index
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Execute a keyword query end to end.
    pub fn search(&self, query: &SearchQuery) -> Result<SearchResults> {
        if !self.index.is_ready() {
            return Err(SearchError::IndexNotReady);
        }
        let started = Instant::now();
        let deadline = Duration::from_millis(self.config.search.timeout_ms);

        let parsed = parser::parse_query(&query.text, &query.filters, &query.options)?;
        let (candidates, needles) = self.evaluate(&parsed, started, deadline)?;
        self.check_deadline(started, deadline)?;

        // Filters are exclusive: failing any predicate drops the
        // candidate no matter its score.
        let mut scored: Vec<(RepoRecord, f32)> = self.index.read(|idx| {
            candidates
                .iter()
                .filter_map(|(id, score)| {
                    idx.records
                        .get(id)
                        .filter(|record| filters::matches(record, &parsed.filters))
                        .map(|record| (record.clone(), *score))
                })
                .collect()
        });

        let total = scored.len();
        sort_candidates(&mut scored, parsed.options.sort_by, parsed.options.sort_order);

        let best_score = scored
            .iter()
            .map(|(_, s)| *s)
            .fold(0.0_f32, f32::max)
            .max(f32::EPSILON);

        let elapsed_ms = started.elapsed().as_millis() as u64;
        let clause_count = parsed.clauses.len();
        let hits: Vec<SearchResult> = scored
            .into_iter()
            .skip(parsed.options.offset)
            .take(parsed.options.limit)
            .map(|(record, score)| {
                assemble_result(record, score, best_score, clause_count, elapsed_ms, &needles)
            })
            .collect();

        debug!(
            query = %query.text,
            total,
            returned = hits.len(),
            elapsed_ms,
            "keyword search complete"
        );

        Ok(SearchResults {
            hits,
            total,
            elapsed_ms,
        })
    }

    // ========================================================================
    // Clause evaluation
    // ========================================================================

    fn evaluate(
        &self,
        parsed: &ParsedQuery,
        started: Instant,
        deadline: Duration,
    ) -> Result<(CandidateScores, Needles)> {
        let mut needles = Needles::default();
        let mut acc: Option<CandidateScores> = None;
        let mut prev_op = ClauseOperator::Or;

        for clause in &parsed.clauses {
            self.check_deadline(started, deadline)?;
            let scores = self.evaluate_clause(clause, &mut needles)?;
            acc = Some(match acc {
                None => scores,
                Some(current) => combine(current, scores, prev_op),
            });
            prev_op = clause.operator;
        }

        Ok((acc.unwrap_or_default(), needles))
    }

    fn evaluate_clause(
        &self,
        clause: &QueryClause,
        needles: &mut Needles,
    ) -> Result<CandidateScores> {
        let boost = clause.boost;
        match &clause.kind {
            ClauseKind::Term { value } => {
                needles.exact.push((None, value.clone()));
                let term = stem(&normalize(value));
                Ok(self
                    .index
                    .read(|idx| scale(score_term(idx, &term), boost)))
            }
            ClauseKind::Phrase { value } => {
                needles.phrases.push(value.clone());
                Ok(self.index.read(|idx| {
                    let words: Vec<String> = value
                        .split_whitespace()
                        .map(|w| stem(&normalize(w)))
                        .filter(|w| !w.is_empty())
                        .collect();
                    if words.is_empty() {
                        return CandidateScores::default();
                    }

                    let word_scores: Vec<CandidateScores> =
                        words.iter().map(|w| score_term(idx, w)).collect();

                    // Documents containing every constituent word
                    let mut combined = word_scores[0].clone();
                    for scores in &word_scores[1..] {
                        combined.retain(|id, _| scores.contains_key(id));
                        for (id, score) in scores {
                            if let Some(total) = combined.get_mut(id) {
                                *total += score;
                            }
                        }
                    }
                    scale(combined, PHRASE_BONUS * boost)
                }))
            }
            ClauseKind::Field { field, value } => {
                needles.exact.push((Some(*field), value.clone()));
                let term = stem(&normalize(value));
                Ok(self.index.read(|idx| {
                    let mut scores = CandidateScores::default();
                    let n = idx.documents.len() as f32;
                    let Some(list) = idx.field_index.get(field).and_then(|t| t.get(&term))
                    else {
                        return scores;
                    };
                    let df = list.document_frequency as f32;
                    if n == 0.0 || df == 0.0 {
                        return scores;
                    }
                    let idf = (n / df).ln();
                    for posting in &list.postings {
                        let tf_idf = (1.0 + (posting.term_frequency as f32).ln()) * idf;
                        scores.insert(
                            posting.document_id.clone(),
                            tf_idf * FIELD_MATCH_BONUS * boost,
                        );
                    }
                    scores
                }))
            }
            ClauseKind::Range { field, op, value } => self.index.read(|idx| {
                let metric = |record: &RepoRecord| -> Result<u64> {
                    match field.as_str() {
                        "stars" => Ok(u64::from(record.stargazers_count)),
                        "forks" => Ok(u64::from(record.forks_count)),
                        "issues" => Ok(u64::from(record.open_issues_count)),
                        _ => Err(SearchError::FieldNotFound {
                            field: field.clone(),
                        }),
                    }
                };
                let mut scores = CandidateScores::default();
                for (id, record) in &idx.records {
                    if op.matches(metric(record)?, *value) {
                        scores.insert(id.clone(), RANGE_SCORE * boost);
                    }
                }
                Ok(scores)
            }),
            ClauseKind::Wildcard { pattern } => Ok(self.index.read(|idx| {
                let mut scores = CandidateScores::default();
                let matched: Vec<String> = idx
                    .inverted_index
                    .keys()
                    .filter(|term| matches_wildcard(term, pattern))
                    .cloned()
                    .collect();
                for term in matched {
                    for (id, score) in score_term(idx, &term) {
                        *scores.entry(id).or_insert(0.0) += score * WILDCARD_WEIGHT * boost;
                    }
                    needles.exact.push((None, term));
                }
                scores
            })),
            ClauseKind::Fuzzy { value, distance } => Ok(self.index.read(|idx| {
                let vocabulary: Vec<String> = idx.inverted_index.keys().cloned().collect();
                let input = normalize(value);
                let suggestions = generate_fuzzy_suggestions(
                    &input,
                    &vocabulary,
                    *distance as usize,
                    FUZZY_EXPANSIONS,
                );
                let mut scores = CandidateScores::default();
                for suggestion in suggestions {
                    let weight = FUZZY_WEIGHT * edit_similarity(&input, &suggestion.text);
                    for (id, score) in score_term(idx, &suggestion.text) {
                        *scores.entry(id).or_insert(0.0) += score * weight * boost;
                    }
                    needles.fuzzy.push(suggestion.text);
                }
                scores
            })),
        }
    }

    fn check_deadline(&self, started: Instant, deadline: Duration) -> Result<()> {
        if deadline.is_zero() {
            return Ok(());
        }
        let elapsed = started.elapsed();
        if elapsed > deadline {
            return Err(SearchError::Timeout {
                elapsed_ms: elapsed.as_millis() as u64,
                limit_ms: deadline.as_millis() as u64,
            });
        }
        Ok(())
    }

    // ========================================================================
    // Suggestions
    // ========================================================================

    /// Vocabulary suggestions: prefix matches, then substring matches,
    /// then similar terms above the configured threshold.
    pub fn suggest(&self, input: &str, limit: usize) -> Result<Vec<SearchSuggestion>> {
        let needle = input.trim().to_lowercase();
        if needle.is_empty() || !self.index.is_ready() {
            return Ok(Vec::new());
        }

        let threshold = self.config.search.fuzzy_threshold;
        let mut suggestions: Vec<SearchSuggestion> = self.index.read(|idx| {
            idx.inverted_index
                .iter()
                .filter_map(|(term, list)| {
                    let score = if term.starts_with(&needle) {
                        1.0
                    } else if term.contains(&needle) {
                        0.8
                    } else {
                        let similarity = edit_similarity(term, &needle);
                        if similarity < threshold {
                            return None;
                        }
                        similarity
                    };
                    Some(SearchSuggestion {
                        text: term.clone(),
                        kind: SuggestionKind::Term,
                        score,
                        frequency: Some(list.document_frequency as u32),
                        last_used: None,
                    })
                })
                .collect()
        });

        suggestions.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.frequency.cmp(&a.frequency))
                .then_with(|| a.text.cmp(&b.text))
        });
        suggestions.truncate(limit);
        Ok(suggestions)
    }

    // ========================================================================
    // Explain
    // ========================================================================

    /// Developer-facing execution trace: named steps with elapsed times
    /// (floored at 1ms) and step details.
    pub fn explain(&self, query: &SearchQuery) -> Result<starsearch_core::ExplainTrace> {
        if !self.index.is_ready() {
            return Err(SearchError::IndexNotReady);
        }
        let started = Instant::now();
        let deadline = Duration::from_millis(self.config.search.timeout_ms);
        let mut trace = starsearch_core::ExplainTrace {
            query: query.text.clone(),
            ..Default::default()
        };

        let step_start = Instant::now();
        let parsed = parser::parse_query(&query.text, &query.filters, &query.options)?;
        trace.push_step(
            "query_parsing",
            step_start.elapsed().as_millis() as u64,
            serde_json::json!({
                "clauses": parsed.clauses.len(),
                "kinds": parsed.clauses.iter().map(clause_kind_name).collect::<Vec<_>>(),
            }),
        );

        let step_start = Instant::now();
        let lookups: Vec<serde_json::Value> = self.index.read(|idx| {
            parsed
                .clauses
                .iter()
                .filter_map(|clause| match &clause.kind {
                    ClauseKind::Term { value } => {
                        let term = stem(&normalize(value));
                        let df = idx
                            .inverted_index
                            .get(&term)
                            .map(|l| l.document_frequency)
                            .unwrap_or(0);
                        Some(serde_json::json!({"term": term, "document_frequency": df}))
                    }
                    _ => None,
                })
                .collect()
        });
        trace.push_step(
            "term_lookup",
            step_start.elapsed().as_millis() as u64,
            serde_json::json!({ "terms": lookups }),
        );

        let step_start = Instant::now();
        let (candidates, _) = self.evaluate(&parsed, started, deadline)?;
        trace.push_step(
            "scoring",
            step_start.elapsed().as_millis() as u64,
            serde_json::json!({ "candidates": candidates.len() }),
        );

        let step_start = Instant::now();
        let mut scored: Vec<(RepoRecord, f32)> = self.index.read(|idx| {
            candidates
                .iter()
                .filter_map(|(id, score)| {
                    idx.records
                        .get(id)
                        .filter(|record| filters::matches(record, &parsed.filters))
                        .map(|record| (record.clone(), *score))
                })
                .collect()
        });
        trace.push_step(
            "filtering",
            step_start.elapsed().as_millis() as u64,
            serde_json::json!({
                "before": candidates.len(),
                "after": scored.len(),
            }),
        );

        let step_start = Instant::now();
        sort_candidates(&mut scored, parsed.options.sort_by, parsed.options.sort_order);
        let top: Vec<String> = scored
            .iter()
            .take(5)
            .map(|(record, _)| record.document_id())
            .collect();
        trace.push_step(
            "sorting",
            step_start.elapsed().as_millis() as u64,
            serde_json::json!({ "top_documents": top }),
        );

        Ok(trace)
    }
}

// ============================================================================
// Scoring helpers
// ============================================================================

/// TF-IDF × max field boost for every document containing an
/// already-stemmed term.
fn score_term(idx: &SearchIndex, term: &str) -> CandidateScores {
    let mut scores = CandidateScores::default();
    let Some(list) = idx.inverted_index.get(term) else {
        return scores;
    };
    let n = idx.documents.len() as f32;
    let df = list.document_frequency as f32;
    if n == 0.0 || df == 0.0 {
        return scores;
    }
    let idf = (n / df).ln();
    for posting in &list.postings {
        let tf_idf = (1.0 + (posting.term_frequency as f32).ln()) * idf;
        scores.insert(posting.document_id.clone(), tf_idf * posting.max_field_boost());
    }
    scores
}

/// Character-level similarity in `[0, 1]` from edit distance.
///
/// Token-set Jaccard is too coarse for single-word typos, so fuzzy
/// weighting uses the same distance-over-length quality measure the
/// analyzer ranks suggestions by.
fn edit_similarity(a: &str, b: &str) -> f32 {
    let longest = a.chars().count().max(b.chars().count()).max(1);
    let distance = levenshtein(a, b);
    1.0 - (distance as f32 / longest as f32).min(1.0)
}

fn scale(mut scores: CandidateScores, factor: f32) -> CandidateScores {
    if (factor - 1.0).abs() > f32::EPSILON {
        for score in scores.values_mut() {
            *score *= factor;
        }
    }
    scores
}

fn combine(
    mut acc: CandidateScores,
    scores: CandidateScores,
    op: ClauseOperator,
) -> CandidateScores {
    match op {
        ClauseOperator::Or => {
            for (id, score) in scores {
                *acc.entry(id).or_insert(0.0) += score;
            }
            acc
        }
        ClauseOperator::And => {
            acc.retain(|id, _| scores.contains_key(id));
            for (id, score) in scores {
                if let Some(total) = acc.get_mut(&id) {
                    *total += score;
                }
            }
            acc
        }
        ClauseOperator::Not => {
            for id in scores.keys() {
                acc.remove(id);
            }
            acc
        }
    }
}

fn clause_kind_name(clause: &QueryClause) -> &'static str {
    match &clause.kind {
        ClauseKind::Term { .. } => "term",
        ClauseKind::Phrase { .. } => "phrase",
        ClauseKind::Field { .. } => "field",
        ClauseKind::Range { .. } => "range",
        ClauseKind::Wildcard { .. } => "wildcard",
        ClauseKind::Fuzzy { .. } => "fuzzy",
    }
}

// ============================================================================
// Sorting and assembly
// ============================================================================

fn sort_candidates(scored: &mut [(RepoRecord, f32)], sort_by: SortBy, order: SortOrder) {
    scored.sort_by(|(ra, sa), (rb, sb)| {
        let ordering = match sort_by {
            SortBy::Relevance => sa.partial_cmp(sb).unwrap_or(Ordering::Equal),
            SortBy::Name => ra.name.cmp(&rb.name),
            SortBy::Stars => ra.stargazers_count.cmp(&rb.stargazers_count),
            SortBy::Updated => ra.updated_at.cmp(&rb.updated_at),
            SortBy::Created => ra.created_at.cmp(&rb.created_at),
        };
        let ordering = match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        };
        // deterministic tie-break: higher score, then lower id
        ordering
            .then_with(|| sb.partial_cmp(sa).unwrap_or(Ordering::Equal))
            .then_with(|| ra.id.cmp(&rb.id))
    });
}

fn assemble_result(
    record: RepoRecord,
    score: f32,
    best_score: f32,
    clause_count: usize,
    search_time_ms: u64,
    needles: &Needles,
) -> SearchResult {
    let mut matches: Vec<SearchMatch> = Vec::new();

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
        let mut spans = Vec::new();
        for (scope, needle) in &needles.exact {
            if scope.is_none() || *scope == Some(field) {
                spans.extend(find_highlights(&text, needle, HighlightKind::Exact));
            }
        }
        for phrase in &needles.phrases {
            spans.extend(find_phrase_highlights(&text, phrase));
        }
        for needle in &needles.fuzzy {
            spans.extend(find_highlights(&text, needle, HighlightKind::Fuzzy));
        }
        let spans = merge_spans(spans);
        if !spans.is_empty() {
            matches.push(SearchMatch {
                field,
                highlights: spans,
            });
        }
    }

    let matched_fields: Vec<Field> = matches.iter().map(|m| m.field).collect();
    let mut relevance_factors = std::collections::HashMap::new();
    relevance_factors.insert("raw_score".to_string(), score);
    relevance_factors.insert("clause_count".to_string(), clause_count as f32);

    SearchResult {
        repository: record,
        score,
        matches,
        metadata: ResultMetadata {
            matched_fields,
            relevance_factors,
            search_time_ms,
            confidence: (score / best_score).clamp(0.0, 1.0),
        },
    }
}

// ============================================================================
// Wildcard matching
// ============================================================================

/// `*` matches any run of characters; everything else is literal.
fn matches_wildcard(text: &str, pattern: &str) -> bool {
    let text_chars: Vec<char> = text.chars().collect();
    let pattern_chars: Vec<char> = pattern.chars().collect();

    fn helper(text: &[char], pattern: &[char]) -> bool {
        match (text.is_empty(), pattern.is_empty()) {
            (true, true) => true,
            (_, true) => false,
            (true, false) => pattern.iter().all(|&c| c == '*'),
            _ => match pattern[0] {
                '*' => helper(text, &pattern[1..]) || helper(&text[1..], pattern),
                p => p == text[0] && helper(&text[1..], &pattern[1..]),
            },
        }
    }

    helper(&text_chars, &pattern_chars)
}
