//! Regulon output types.
//!
//! A [`RegulonSet`] is the artifact returned by pruning: one [`Regulon`] per
//! regulator that kept at least one target, plus the parameters used.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use regulon_common::{PruneParams, RegulatoryTable, RegulonError, Result, Sign};

/// Which targets of a regulon to hand to a downstream scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    Positive,
    Negative,
    #[default]
    Both,
}

impl TargetType {
    pub fn matches(&self, sign: Sign) -> bool {
        match self {
            TargetType::Positive => sign == Sign::Positive,
            TargetType::Negative => sign == Sign::Negative,
            TargetType::Both => true,
        }
    }
}

impl FromStr for TargetType {
    type Err = RegulonError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(TargetType::Positive),
            "negative" => Ok(TargetType::Negative),
            "both" => Ok(TargetType::Both),
            other => Err(RegulonError::invalid_parameter(
                "target_type",
                format!("expected positive, negative or both, got {other:?}"),
            )),
        }
    }
}

/// A target kept for a regulator, with the input row it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetainedEdge {
    pub row: usize,
    pub target: String,
    pub score: f64,
    pub sign: Sign,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub association: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Regulon {
    pub regulator: String,
    /// In input row order.
    pub targets: Vec<RetainedEdge>,
}

impl Regulon {
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn contains(&self, target: &str) -> bool {
        self.targets.iter().any(|t| t.target == target)
    }

    pub fn target_ids(&self) -> Vec<&str> {
        self.select(TargetType::Both)
    }

    /// Target ids whose edge sign matches `target_type`.
    pub fn select(&self, target_type: TargetType) -> Vec<&str> {
        self.targets
            .iter()
            .filter(|t| target_type.matches(t.sign))
            .map(|t| t.target.as_str())
            .collect()
    }
}

/// Targets of one regulator split by edge sign.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignSplit {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

/// Pruned regulons keyed by regulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegulonSet {
    params: PruneParams,
    regulons: BTreeMap<String, Regulon>,
}

impl RegulonSet {
    /// Build from retained row indices of `table`. Rows must be ascending
    /// and in range.
    pub(crate) fn from_rows(table: &RegulatoryTable, rows: &[usize], params: PruneParams) -> Self {
        let mut regulons: BTreeMap<String, Regulon> = BTreeMap::new();
        for &row in rows {
            let edge = &table.edges()[row];
            regulons
                .entry(edge.regulator.clone())
                .or_insert_with(|| Regulon {
                    regulator: edge.regulator.clone(),
                    targets: Vec::new(),
                })
                .targets
                .push(RetainedEdge {
                    row,
                    target: edge.target.clone(),
                    score: edge.score,
                    sign: edge.sign,
                    association: edge.association,
                });
        }
        Self { params, regulons }
    }

    /// Parameters this set was produced with.
    pub fn params(&self) -> &PruneParams {
        &self.params
    }

    pub fn get(&self, regulator: &str) -> Option<&Regulon> {
        self.regulons.get(regulator)
    }

    /// Regulons in regulator order.
    pub fn iter(&self) -> impl Iterator<Item = &Regulon> {
        self.regulons.values()
    }

    /// Number of regulons.
    pub fn len(&self) -> usize {
        self.regulons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regulons.is_empty()
    }

    /// Total retained edges across all regulons.
    pub fn n_edges(&self) -> usize {
        self.regulons.values().map(Regulon::len).sum()
    }

    /// Targets of `regulator` filtered by sign; empty if the regulator kept
    /// nothing.
    pub fn targets(&self, regulator: &str, target_type: TargetType) -> Vec<&str> {
        self.get(regulator)
            .map(|r| r.select(target_type))
            .unwrap_or_default()
    }

    pub fn split_by_sign(&self) -> BTreeMap<String, SignSplit> {
        self.regulons
            .iter()
            .map(|(name, regulon)| {
                let mut split = SignSplit::default();
                for t in &regulon.targets {
                    match t.sign {
                        Sign::Positive => split.positive.push(t.target.clone()),
                        Sign::Negative => split.negative.push(t.target.clone()),
                    }
                }
                (name.clone(), split)
            })
            .collect()
    }

    /// Regulators that kept `target`, in regulator order.
    pub fn regulators_of(&self, target: &str) -> Vec<&str> {
        self.regulons
            .values()
            .filter(|r| r.contains(target))
            .map(|r| r.regulator.as_str())
            .collect()
    }

    /// Every retained edge as `(regulator, edge)`, in input row order.
    pub fn edges(&self) -> Vec<(&str, &RetainedEdge)> {
        let mut all: Vec<(&str, &RetainedEdge)> = self
            .regulons
            .values()
            .flat_map(|r| r.targets.iter().map(move |t| (r.regulator.as_str(), t)))
            .collect();
        all.sort_by_key(|(_, t)| t.row);
        all
    }

    pub fn summary(&self) -> String {
        format!(
            "RegulonSet: {} regulons, {} edges (strategy {}, reg_thresh={})",
            self.len(),
            self.n_edges(),
            self.params.strategy,
            self.params.reg_thresh
        )
    }
}

impl fmt::Display for RegulonSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}
