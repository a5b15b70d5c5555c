//! Score ranking within regulator / target groups.

use std::cmp::Ordering;
use std::collections::HashMap;

use regulon_common::ScoredEdge;

/// Group row indices by a key, keeping groups in order of first appearance
/// and rows within a group in ascending order.
pub fn group_rows<'a, F>(edges: &'a [ScoredEdge], rows: &[usize], key: F) -> Vec<Vec<usize>>
where
    F: Fn(&'a ScoredEdge) -> &'a str,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for &row in rows {
        let k = key(&edges[row]);
        let slot = *index.entry(k).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(row);
    }
    groups
}

/// Keep the `k` highest-scoring rows of a group.
///
/// The sort is stable, so among equal scores the earlier row wins.
/// Expects `rows` in ascending order and finite scores.
pub fn top_k(edges: &[ScoredEdge], mut rows: Vec<usize>, k: usize) -> Vec<usize> {
    if rows.len() > k {
        rows.sort_by(|&a, &b| {
            edges[b]
                .score
                .partial_cmp(&edges[a].score)
                .unwrap_or(Ordering::Equal)
        });
        rows.truncate(k);
    }
    rows
}
