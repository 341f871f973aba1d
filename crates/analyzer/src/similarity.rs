//! String similarity and fuzzy suggestion ranking

use rustc_hash::FxHashSet;

/// Token-set Jaccard similarity over each string's own tokenization
///
/// Returns a value in `[0, 1]`. Two strings that tokenize to nothing are
/// treated as identical.
pub fn calculate_similarity(a: &str, b: &str) -> f32 {
    let set_a = token_set(a);
    let set_b = token_set(b);

    if set_a.is_empty() && set_b.is_empty() {
        return 1.0;
    }

    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();
    if union == 0 {
        return 0.0;
    }
    intersection as f32 / union as f32
}

fn token_set(text: &str) -> FxHashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Levenshtein edit distance
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0usize; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// One fuzzy suggestion candidate
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzySuggestion {
    /// The suggested vocabulary term
    pub text: String,
    /// Edit distance from the input (0 for prefix/substring matches)
    pub distance: usize,
}

/// Rank vocabulary terms against a possibly misspelled input
///
/// Prefix matches come first (distance 0), then substring containment
/// (distance 0), then anything within `max_distance` edits. Final order is
/// distance ascending, then match quality descending.
pub fn generate_fuzzy_suggestions(
    input: &str,
    vocabulary: &[String],
    max_distance: usize,
    limit: usize,
) -> Vec<FuzzySuggestion> {
    let needle = input.to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(FuzzySuggestion, f32)> = Vec::new();
    for term in vocabulary {
        let candidate = term.to_lowercase();
        let (distance, quality) = if candidate.starts_with(&needle) {
            (0, 1.0)
        } else if candidate.contains(&needle) {
            (0, 0.8)
        } else {
            let d = levenshtein(&needle, &candidate);
            if d > max_distance {
                continue;
            }
            let longest = needle.chars().count().max(candidate.chars().count()).max(1);
            (d, 1.0 - d as f32 / longest as f32)
        };
        scored.push((
            FuzzySuggestion {
                text: term.clone(),
                distance,
            },
            quality,
        ));
    }

    scored.sort_by(|(a, qa), (b, qb)| {
        a.distance
            .cmp(&b.distance)
            .then(qb.partial_cmp(qa).unwrap_or(std::cmp::Ordering::Equal))
            .then(a.text.cmp(&b.text))
    });

    scored
        .into_iter()
        .take(limit)
        .map(|(suggestion, _)| suggestion)
        .collect()
}
