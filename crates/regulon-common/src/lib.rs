//! regulon-common — Shared types, errors, and configuration used across all Regulon crates.

pub mod error;
pub mod edges;
pub mod prune_config;

// Re-export commonly used types
pub use error::{RegulonError, Result};
pub use edges::{RegulatoryTable, ScoredEdge, Sign};
pub use prune_config::{PruneConfig, PruneOptions, PruneParams, Strategy, StrategyToken};
