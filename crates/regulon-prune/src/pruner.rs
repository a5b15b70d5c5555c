//! Regulon assignment: reduce a scored TF → target table to per-regulator
//! target sets.
//!
//! Three strategies are supported (see [`Strategy`]):
//!
//! | Strategy | Group by  | Cap       |
//! |----------|-----------|-----------|
//! | A        | target    | `n_tfs`   |
//! | B        | regulator | `n_genes` |
//! | C        | —         | none      |
//!
//! In every case an edge must score strictly above `reg_thresh`; the
//! threshold is applied before the cap.

use rayon::prelude::*;
use tracing::{debug, info};

use regulon_common::{
    PruneOptions, PruneParams, RegulatoryTable, RegulonError, Result, ScoredEdge, Strategy,
};

use crate::rank::{group_rows, top_k};
use crate::regulon::RegulonSet;

/// Prune `table` with default execution options.
pub fn assign_regulons(table: &RegulatoryTable, params: &PruneParams) -> Result<RegulonSet> {
    assign_regulons_with(table, params, &PruneOptions::default())
}

/// Prune `table` into a fresh [`RegulonSet`].
///
/// Checks run in order: `reg_thresh` is finite, the table is non-empty,
/// the active strategy's cap is positive. All happen before any filtering;
/// on error no output is produced. The table is not modified.
pub fn assign_regulons_with(
    table: &RegulatoryTable,
    params: &PruneParams,
    options: &PruneOptions,
) -> Result<RegulonSet> {
    params.validate_threshold()?;
    if table.is_empty() {
        return Err(RegulonError::EmptyInput);
    }
    params.validate_cap()?;

    let edges = table.edges();
    let qualifying = rows_above(edges, params.reg_thresh, options);
    debug!(
        rows = edges.len(),
        qualifying = qualifying.len(),
        reg_thresh = params.reg_thresh,
        "Threshold pass done"
    );

    let retained = match params.strategy {
        Strategy::TopRegulatorsPerTarget { n_tfs } => {
            capped(edges, &qualifying, |e| e.target.as_str(), n_tfs, options)
        }
        Strategy::TopTargetsPerRegulator { n_genes } => {
            capped(edges, &qualifying, |e| e.regulator.as_str(), n_genes, options)
        }
        Strategy::GlobalThreshold => qualifying,
    };

    let set = RegulonSet::from_rows(table, &retained, *params);
    info!(
        strategy = %params.strategy,
        rows = edges.len(),
        retained = set.n_edges(),
        regulons = set.len(),
        "Assigned regulons"
    );
    Ok(set)
}

fn use_parallel(work_items: usize, options: &PruneOptions) -> bool {
    options.parallel_threshold > 0 && work_items >= options.parallel_threshold
}

/// Rows with `score > reg_thresh`, ascending.
fn rows_above(edges: &[ScoredEdge], reg_thresh: f64, options: &PruneOptions) -> Vec<usize> {
    if use_parallel(edges.len(), options) {
        edges
            .par_iter()
            .enumerate()
            .filter(|(_, e)| e.score > reg_thresh)
            .map(|(row, _)| row)
            .collect()
    } else {
        edges
            .iter()
            .enumerate()
            .filter(|(_, e)| e.score > reg_thresh)
            .map(|(row, _)| row)
            .collect()
    }
}

/// Apply a per-group cap, returning retained rows in ascending order.
fn capped<'a, F>(
    edges: &'a [ScoredEdge],
    rows: &[usize],
    key: F,
    cap: usize,
    options: &PruneOptions,
) -> Vec<usize>
where
    F: Fn(&'a ScoredEdge) -> &'a str,
{
    let groups = group_rows(edges, rows, key);
    debug!(groups = groups.len(), cap, "Ranking groups");

    let mut retained: Vec<usize> = if use_parallel(groups.len(), options) {
        groups
            .into_par_iter()
            .flat_map_iter(|g| top_k(edges, g, cap))
            .collect()
    } else {
        groups
            .into_iter()
            .flat_map(|g| top_k(edges, g, cap))
            .collect()
    };
    retained.sort_unstable();
    retained
}

#[cfg(test)]
mod tests {
    use super::*;
    use regulon_common::Sign;

    fn table(rows: &[(&str, &str, f64)]) -> RegulatoryTable {
        RegulatoryTable::new(
            rows.iter()
                .map(|&(tf, gene, score)| ScoredEdge::new(tf, gene, score, Sign::Positive))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_threshold_excludes_even_when_cap_allows() {
        let t = table(&[("TF1", "G1", 0.9), ("TF2", "G1", 0.5), ("TF3", "G1", 0.05)]);
        let set = assign_regulons(&t, &PruneParams::top_regulators_per_target(2, 0.1)).unwrap();
        assert_eq!(set.regulators_of("G1"), vec!["TF1", "TF2"]);
        assert_eq!(set.n_edges(), 2);
    }

    #[test]
    fn test_score_equal_to_threshold_is_dropped() {
        let t = table(&[("TF1", "G1", 0.1), ("TF2", "G1", 0.2)]);
        let set = assign_regulons(&t, &PruneParams::global_threshold(0.1)).unwrap();
        assert_eq!(set.regulators_of("G1"), vec!["TF2"]);
    }

    #[test]
    fn test_strategy_b_caps_targets_per_regulator() {
        let t = table(&[
            ("TF1", "G1", 0.3),
            ("TF1", "G2", 0.8),
            ("TF1", "G3", 0.5),
            ("TF2", "G1", 0.4),
        ]);
        let set = assign_regulons(&t, &PruneParams::top_targets_per_regulator(2, 0.0)).unwrap();
        assert_eq!(set.get("TF1").unwrap().target_ids(), vec!["G2", "G3"]);
        assert_eq!(set.get("TF2").unwrap().target_ids(), vec!["G1"]);
    }

    #[test]
    fn test_errors_leave_no_output() {
        let t = table(&[("TF1", "G1", 0.9)]);
        let err = assign_regulons(&t, &PruneParams::global_threshold(f64::NAN)).unwrap_err();
        assert!(matches!(err, RegulonError::InvalidParameter { name: "reg_thresh", .. }));

        let err = assign_regulons(&RegulatoryTable::default(), &PruneParams::global_threshold(0.0))
            .unwrap_err();
        assert!(matches!(err, RegulonError::EmptyInput));
    }

    #[test]
    fn test_empty_table_reported_before_cap() {
        let err = assign_regulons(
            &RegulatoryTable::default(),
            &PruneParams::top_regulators_per_target(0, 0.1),
        )
        .unwrap_err();
        assert!(matches!(err, RegulonError::EmptyInput));

        // A bad threshold still wins over an empty table.
        let err = assign_regulons(
            &RegulatoryTable::default(),
            &PruneParams::top_targets_per_regulator(0, f64::NAN),
        )
        .unwrap_err();
        assert!(matches!(err, RegulonError::InvalidParameter { name: "reg_thresh", .. }));
    }

    #[test]
    fn test_nothing_qualifies_gives_empty_set() {
        let t = table(&[("TF1", "G1", 0.01)]);
        let set = assign_regulons(&t, &PruneParams::top_regulators_per_target(3, 0.5)).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.n_edges(), 0);
    }
}
