//! Repository records and searchable fields
//!
//! This module defines the inbound data shape (GitHub repository records,
//! serde-compatible with the REST API payloads) and the fixed set of
//! searchable fields the indexer extracts from each record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Field
// ============================================================================

/// Searchable fields extracted from a repository record
///
/// The enum ordering matches extraction order; `Readme` is reserved for a
/// future content source and is never populated today. `All` is the
/// concatenation of every populated field and is the default search target.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// Repository name
    Name,
    /// Repository description
    Description,
    /// Topics, joined by spaces
    Topics,
    /// Owner login
    Owner,
    /// Primary language
    Language,
    /// Reserved: README content
    Readme,
    /// Concatenation of all populated fields
    All,
}

impl Field {
    /// Every field the indexer populates, in extraction order.
    pub const INDEXED: [Field; 6] = [
        Field::Name,
        Field::Description,
        Field::Topics,
        Field::Owner,
        Field::Language,
        Field::All,
    ];

    /// Canonical lowercase name, matching the snapshot wire form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Description => "description",
            Field::Topics => "topics",
            Field::Owner => "owner",
            Field::Language => "language",
            Field::Readme => "readme",
            Field::All => "all",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "name" => Ok(Field::Name),
            "description" => Ok(Field::Description),
            "topics" => Ok(Field::Topics),
            "owner" => Ok(Field::Owner),
            "language" => Ok(Field::Language),
            "readme" => Ok(Field::Readme),
            "all" => Ok(Field::All),
            _ => Err(()),
        }
    }
}

// ============================================================================
// RepoRecord
// ============================================================================

/// Owner of a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoOwner {
    /// GitHub login of the owner
    pub login: String,
}

/// One starred repository, as delivered by the GitHub-data collaborator
///
/// Field names follow the GitHub REST shapes so an already-fetched batch
/// deserializes directly. The core treats these as opaque, pre-fetched
/// records and performs no network calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoRecord {
    /// Numeric repository id; its string form keys the index
    pub id: u64,
    /// Repository name
    pub name: String,
    /// Description, if any
    #[serde(default)]
    pub description: Option<String>,
    /// Topic labels
    #[serde(default)]
    pub topics: Vec<String>,
    /// Repository owner
    pub owner: RepoOwner,
    /// Primary language, if detected
    #[serde(default)]
    pub language: Option<String>,
    /// Star count
    #[serde(default)]
    pub stargazers_count: u32,
    /// Fork count
    #[serde(default)]
    pub forks_count: u32,
    /// Open issue count
    #[serde(default)]
    pub open_issues_count: u32,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last metadata update timestamp
    pub updated_at: DateTime<Utc>,
    /// Last push timestamp
    pub pushed_at: DateTime<Utc>,
    /// Whether the repository is archived
    #[serde(default)]
    pub archived: bool,
    /// Whether the repository is itself a fork
    #[serde(default)]
    pub fork: bool,
}

impl RepoRecord {
    /// String form of the numeric id, used as the index document key.
    pub fn document_id(&self) -> String {
        self.id.to_string()
    }

    /// Raw text for one searchable field, in extraction order.
    ///
    /// Returns `None` for fields with no content on this record and for
    /// the reserved `Readme` field.
    pub fn field_text(&self, field: Field) -> Option<String> {
        match field {
            Field::Name => Some(self.name.clone()),
            Field::Description => self.description.clone(),
            Field::Topics => {
                if self.topics.is_empty() {
                    None
                } else {
                    Some(self.topics.join(" "))
                }
            }
            Field::Owner => Some(self.owner.login.clone()),
            Field::Language => self.language.clone(),
            Field::Readme => None,
            Field::All => {
                let mut parts: Vec<String> = Vec::new();
                for f in [
                    Field::Name,
                    Field::Description,
                    Field::Topics,
                    Field::Owner,
                    Field::Language,
                ] {
                    if let Some(text) = self.field_text(f) {
                        parts.push(text);
                    }
                }
                Some(parts.join(" "))
            }
        }
    }
}
