//! Hard result filters
//!
//! Filters are exclusive: a repository failing any active predicate is
//! dropped from the candidate set entirely, regardless of score.

use starsearch_core::{RepoRecord, SearchFilters};

/// True when the record passes every active predicate.
pub fn matches(record: &RepoRecord, filters: &SearchFilters) -> bool {
    if let Some(language) = &filters.language {
        match &record.language {
            Some(actual) if actual.eq_ignore_ascii_case(language) => {}
            _ => return false,
        }
    }
    if let Some(min) = filters.min_stars {
        if record.stargazers_count < min {
            return false;
        }
    }
    if let Some(max) = filters.max_stars {
        if record.stargazers_count > max {
            return false;
        }
    }
    if !filters.include_archived && record.archived {
        return false;
    }
    if !filters.include_forks && record.fork {
        return false;
    }
    if let Some(after) = filters.created_after {
        if record.created_at < after {
            return false;
        }
    }
    if let Some(before) = filters.created_before {
        if record.created_at > before {
            return false;
        }
    }
    if let Some(after) = filters.updated_after {
        if record.updated_at < after {
            return false;
        }
    }
    if let Some(before) = filters.updated_before {
        if record.updated_at > before {
            return false;
        }
    }
    true
}
