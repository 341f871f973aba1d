//! Query parsing
//!
//! A small character-walking tokenizer (separate from the text
//! analyzer's) honors double-quoted spans as single tokens and splits
//! elsewhere on whitespace. Each token is then classified, in priority
//! order: phrase, range, field, operator, wildcard, fuzzy, term.
//! `AND`/`OR`/`NOT` never create clauses of their own; they set the
//! combining operator on the clause before them.

use starsearch_core::{
    ClauseKind, ClauseOperator, Field, ParsedQuery, QueryClause, RangeOp, Result, SearchError,
    SearchFilters, SearchOptions,
};

/// Edit distance used when a `~` clause omits an explicit distance
pub const DEFAULT_FUZZY_DISTANCE: u32 = 2;

/// Raw query token: either a quoted phrase or a whitespace-delimited word
#[derive(Debug, PartialEq)]
enum RawToken {
    Quoted(String),
    Bare(String),
}

fn scan(text: &str) -> Vec<RawToken> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in text.chars() {
        match c {
            '"' => {
                if in_quotes {
                    tokens.push(RawToken::Quoted(std::mem::take(&mut current)));
                    in_quotes = false;
                } else {
                    if !current.is_empty() {
                        tokens.push(RawToken::Bare(std::mem::take(&mut current)));
                    }
                    in_quotes = true;
                }
            }
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    tokens.push(RawToken::Bare(std::mem::take(&mut current)));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        // An unterminated quote still yields its span as a phrase
        if in_quotes {
            tokens.push(RawToken::Quoted(current));
        } else {
            tokens.push(RawToken::Bare(current));
        }
    }
    tokens
}

fn is_range_value(value: &str) -> bool {
    let rest = value
        .strip_prefix(">=")
        .or_else(|| value.strip_prefix("<="))
        .or_else(|| value.strip_prefix('>'))
        .or_else(|| value.strip_prefix('<'));
    match rest {
        Some(digits) => !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()),
        None => false,
    }
}

fn parse_range(field: &str, value: &str) -> Result<ClauseKind> {
    let (op, digits) = if let Some(d) = value.strip_prefix(">=") {
        (RangeOp::Gte, d)
    } else if let Some(d) = value.strip_prefix("<=") {
        (RangeOp::Lte, d)
    } else if let Some(d) = value.strip_prefix('>') {
        (RangeOp::Gt, d)
    } else if let Some(d) = value.strip_prefix('<') {
        (RangeOp::Lt, d)
    } else {
        return Err(SearchError::InvalidSyntax {
            reason: format!("malformed range value: {value}"),
        });
    };
    let bound: u64 = digits.parse().map_err(|_| SearchError::InvalidSyntax {
        reason: format!("range bound out of range: {digits}"),
    })?;
    Ok(ClauseKind::Range {
        field: field.to_string(),
        op,
        value: bound,
    })
}

/// Parse raw query text into an ordered clause list
///
/// Non-phrase values are case-folded unless `options.case_sensitive`.
/// Unknown field names in `field:value` clauses raise `FieldNotFound`;
/// range clause fields are validated later against the numeric
/// attributes the executor supports.
pub fn parse_query(
    text: &str,
    filters: &SearchFilters,
    options: &SearchOptions,
) -> Result<ParsedQuery> {
    let mut clauses: Vec<QueryClause> = Vec::new();

    let fold = |value: &str| -> String {
        if options.case_sensitive {
            value.to_string()
        } else {
            value.to_lowercase()
        }
    };

    for token in scan(text) {
        let kind = match token {
            RawToken::Quoted(phrase) => {
                if phrase.trim().is_empty() {
                    continue;
                }
                ClauseKind::Phrase { value: phrase }
            }
            RawToken::Bare(word) => {
                if let Some((field_part, value_part)) = word.split_once(':') {
                    if is_range_value(value_part) {
                        parse_range(&fold(field_part), value_part)?
                    } else {
                        let field_name = fold(field_part);
                        let field: Field =
                            field_name
                                .parse()
                                .map_err(|_| SearchError::FieldNotFound {
                                    field: field_part.to_string(),
                                })?;
                        ClauseKind::Field {
                            field,
                            value: fold(value_part),
                        }
                    }
                } else if word == "AND" || word == "OR" || word == "NOT" {
                    if let Some(previous) = clauses.last_mut() {
                        previous.operator = match word.as_str() {
                            "AND" => ClauseOperator::And,
                            "NOT" => ClauseOperator::Not,
                            _ => ClauseOperator::Or,
                        };
                    }
                    continue;
                } else if word.contains('*') {
                    ClauseKind::Wildcard {
                        pattern: fold(&word),
                    }
                } else if let Some((value, distance_part)) = word.split_once('~') {
                    if value.is_empty() {
                        continue;
                    }
                    let distance = distance_part.parse().unwrap_or(DEFAULT_FUZZY_DISTANCE);
                    ClauseKind::Fuzzy {
                        value: fold(value),
                        distance,
                    }
                } else {
                    ClauseKind::Term { value: fold(&word) }
                }
            }
        };
        clauses.push(QueryClause::new(kind));
    }

    Ok(ParsedQuery {
        original_text: text.to_string(),
        clauses,
        filters: filters.clone(),
        options: options.clone(),
    })
}
