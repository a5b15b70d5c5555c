//! Shared fixtures for Regulon tests.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use regulon_common::{RegulatoryTable, ScoredEdge, Sign};

/// Positive edge shorthand.
pub fn edge(regulator: &str, target: &str, score: f64) -> ScoredEdge {
    ScoredEdge::new(regulator, target, score, Sign::Positive)
}

/// Build a table from `(regulator, target, score)` rows.
///
/// # Panics
///
/// Panics if the rows violate table invariants.
pub fn table(rows: &[(&str, &str, f64)]) -> RegulatoryTable {
    RegulatoryTable::new(rows.iter().map(|&(r, t, s)| edge(r, t, s)).collect())
        .expect("fixture rows must form a valid table")
}

/// Seeded random table over `n_regulators × n_targets` candidate pairs.
///
/// Each pair is included with probability `density`. Scores are drawn from
/// a small grid so ties are common; signs are random.
pub fn random_table(seed: u64, n_regulators: usize, n_targets: usize, density: f64) -> RegulatoryTable {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut edges = Vec::new();
    for r in 0..n_regulators {
        for t in 0..n_targets {
            if rng.gen_bool(density) {
                let score = rng.gen_range(0..20) as f64 / 20.0;
                let association: f64 = rng.gen_range(-1.0..1.0);
                edges.push(
                    ScoredEdge::new(format!("TF{r}"), format!("G{t}"), score, Sign::Positive)
                        .with_association(association),
                );
            }
        }
    }
    // Shuffle so row order is independent of the pair grid.
    edges.shuffle(&mut rng);
    RegulatoryTable::new(edges).expect("generated pairs are unique")
}
