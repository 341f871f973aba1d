//! Engine configuration
//!
//! Plain serde-derived config structs with three named presets
//! (`performance`, `memory`, `development`) that differ only in numeric
//! values. The cache section is consumed by an external caching
//! collaborator; the core carries it through untouched.

use crate::types::Field;
use serde::{Deserialize, Serialize};

// ============================================================================
// Field weights
// ============================================================================

/// Per-field boost weights applied during scoring
///
/// A term-in-document's boost is the maximum weight across the fields the
/// term occurs in, never the sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldWeights {
    /// Weight for the repository name
    pub name: f32,
    /// Weight for the description
    pub description: f32,
    /// Weight for topic labels
    pub topics: f32,
    /// Weight for the owner login
    pub owner: f32,
    /// Weight for the primary language
    pub language: f32,
    /// Weight for README content (reserved)
    pub readme: f32,
}

impl Default for FieldWeights {
    fn default() -> Self {
        FieldWeights {
            name: 2.0,
            description: 1.5,
            topics: 1.8,
            owner: 1.2,
            language: 1.0,
            readme: 1.0,
        }
    }
}

impl FieldWeights {
    /// Weight for a single field. The synthetic `All` field carries no
    /// boost of its own.
    pub fn weight(&self, field: Field) -> f32 {
        match field {
            Field::Name => self.name,
            Field::Description => self.description,
            Field::Topics => self.topics,
            Field::Owner => self.owner,
            Field::Language => self.language,
            Field::Readme => self.readme,
            Field::All => 1.0,
        }
    }
}

// ============================================================================
// Config sections
// ============================================================================

/// Indexing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexingConfig {
    /// Records processed per batch during `build_index`
    pub batch_size: usize,
    /// Soft cap on indexed documents
    pub max_documents: usize,
    /// Per-field scoring weights
    pub field_weights: FieldWeights,
}

impl Default for IndexingConfig {
    fn default() -> Self {
        IndexingConfig {
            batch_size: 100,
            max_documents: 50_000,
            field_weights: FieldWeights::default(),
        }
    }
}

/// Search execution configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Result count when the caller does not specify a limit
    pub default_limit: usize,
    /// Hard cap the orchestrator clamps requested limits to
    pub max_limit: usize,
    /// Cooperative execution deadline in milliseconds
    pub timeout_ms: u64,
    /// Minimum similarity for fuzzy vocabulary suggestions
    pub fuzzy_threshold: f32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            default_limit: 20,
            max_limit: 100,
            timeout_ms: 5_000,
            fuzzy_threshold: 0.3,
        }
    }
}

/// Cache configuration, consumed by the external caching collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether the external result cache is enabled
    pub enabled: bool,
    /// Maximum cached entries
    pub max_size: usize,
    /// Entry time-to-live in seconds
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            enabled: true,
            max_size: 500,
            ttl_secs: 300,
        }
    }
}

/// Performance tuning knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Reserved: evaluate clauses in parallel
    pub enable_parallel_search: bool,
    /// Suggested input throttle for interactive callers, milliseconds
    pub throttle_ms: u64,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        PerformanceConfig {
            enable_parallel_search: false,
            throttle_ms: 150,
        }
    }
}

// ============================================================================
// EngineConfig
// ============================================================================

/// Top-level engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Indexing section
    pub indexing: IndexingConfig,
    /// Search section
    pub search: SearchConfig,
    /// Cache section (external collaborator)
    pub cache: CacheConfig,
    /// Performance section
    pub performance: PerformanceConfig,
}

impl EngineConfig {
    /// Preset tuned for throughput on larger datasets.
    pub fn performance() -> Self {
        EngineConfig {
            indexing: IndexingConfig {
                batch_size: 500,
                max_documents: 100_000,
                ..IndexingConfig::default()
            },
            search: SearchConfig {
                default_limit: 20,
                max_limit: 200,
                timeout_ms: 2_000,
                fuzzy_threshold: 0.4,
            },
            cache: CacheConfig {
                enabled: true,
                max_size: 2_000,
                ttl_secs: 600,
            },
            performance: PerformanceConfig {
                enable_parallel_search: true,
                throttle_ms: 100,
            },
        }
    }

    /// Preset tuned for low memory footprint.
    pub fn memory() -> Self {
        EngineConfig {
            indexing: IndexingConfig {
                batch_size: 50,
                max_documents: 10_000,
                ..IndexingConfig::default()
            },
            search: SearchConfig {
                default_limit: 10,
                max_limit: 50,
                timeout_ms: 5_000,
                fuzzy_threshold: 0.3,
            },
            cache: CacheConfig {
                enabled: false,
                max_size: 100,
                ttl_secs: 60,
            },
            performance: PerformanceConfig {
                enable_parallel_search: false,
                throttle_ms: 250,
            },
        }
    }

    /// Preset for local development: small batches, long deadlines.
    pub fn development() -> Self {
        EngineConfig {
            indexing: IndexingConfig {
                batch_size: 25,
                max_documents: 5_000,
                ..IndexingConfig::default()
            },
            search: SearchConfig {
                default_limit: 20,
                max_limit: 100,
                timeout_ms: 30_000,
                fuzzy_threshold: 0.2,
            },
            cache: CacheConfig {
                enabled: false,
                max_size: 50,
                ttl_secs: 30,
            },
            performance: PerformanceConfig {
                enable_parallel_search: false,
                throttle_ms: 500,
            },
        }
    }
}
