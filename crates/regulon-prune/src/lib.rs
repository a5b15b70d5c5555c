//! regulon-prune — Regulon assignment from scored TF → target tables.
//!
//! ```
//! use regulon_common::{PruneParams, RegulatoryTable, ScoredEdge, Sign};
//! use regulon_prune::assign_regulons;
//!
//! let table = RegulatoryTable::new(vec![
//!     ScoredEdge::new("TF1", "G1", 0.9, Sign::Positive),
//!     ScoredEdge::new("TF2", "G1", 0.5, Sign::Positive),
//!     ScoredEdge::new("TF3", "G1", 0.05, Sign::Positive),
//! ]).unwrap();
//!
//! let set = assign_regulons(&table, &PruneParams::top_regulators_per_target(2, 0.1)).unwrap();
//! assert_eq!(set.regulators_of("G1"), vec!["TF1", "TF2"]);
//! ```

pub mod output;
pub mod pruner;
pub mod rank;
pub mod regulon;
pub mod source;

pub use output::{write_json, write_tsv};
pub use pruner::{assign_regulons, assign_regulons_with};
pub use regulon::{Regulon, RegulonSet, RetainedEdge, SignSplit, TargetType};
pub use source::{ColumnMapping, DelimitedTableSource, InMemoryTableSource, TableSource};
