//! Core table types for TF → target regulatory scores.
//! Rows are produced by an upstream regression model; identifiers are opaque keys.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{RegulonError, Result};

// ---------------------------------------------------------------------------
// Sign
// ---------------------------------------------------------------------------

/// Direction of a predicted regulatory relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    /// Activating
    Positive,
    /// Repressing
    Negative,
}

impl Sign {
    /// Sign of a signed association value. Zero counts as positive.
    pub fn of(association: f64) -> Self {
        if association < 0.0 {
            Sign::Negative
        } else {
            Sign::Positive
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sign::Positive => "positive",
            Sign::Negative => "negative",
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sign {
    type Err = RegulonError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "+" | "pos" | "positive" => Ok(Sign::Positive),
            "-" | "neg" | "negative" => Ok(Sign::Negative),
            other => Err(RegulonError::invalid_parameter(
                "sign",
                format!("unrecognised sign {other:?}"),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Scored Edge
// ---------------------------------------------------------------------------

/// One (regulator, target) row of a regulatory table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredEdge {
    pub regulator: String,
    pub target: String,
    /// Regulatory score; higher is a stronger predicted relationship.
    pub score: f64,
    pub sign: Sign,
    /// Signed association between regulator and target (e.g. correlation).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub association: Option<f64>,
}

impl ScoredEdge {
    pub fn new(
        regulator: impl Into<String>,
        target: impl Into<String>,
        score: f64,
        sign: Sign,
    ) -> Self {
        Self {
            regulator: regulator.into(),
            target: target.into(),
            score,
            sign,
            association: None,
        }
    }

    /// Attach a signed association; the edge's sign follows it.
    pub fn with_association(mut self, association: f64) -> Self {
        self.sign = Sign::of(association);
        self.association = Some(association);
        self
    }
}

// ---------------------------------------------------------------------------
// Regulatory Table
// ---------------------------------------------------------------------------

/// Ordered collection of scored edges. Row order is significant: it breaks
/// score ties during pruning.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RegulatoryTable {
    edges: Vec<ScoredEdge>,
}

impl RegulatoryTable {
    /// Build a table, rejecting repeated (regulator, target) pairs and
    /// non-finite scores or associations.
    pub fn new(edges: Vec<ScoredEdge>) -> Result<Self> {
        let mut seen: HashSet<(&str, &str)> = HashSet::with_capacity(edges.len());
        for (row, edge) in edges.iter().enumerate() {
            if !edge.score.is_finite() {
                return Err(RegulonError::InvalidEdge {
                    row,
                    reason: format!("score {} is not finite", edge.score),
                });
            }
            if let Some(a) = edge.association {
                if !a.is_finite() {
                    return Err(RegulonError::InvalidEdge {
                        row,
                        reason: format!("association {a} is not finite"),
                    });
                }
            }
            if !seen.insert((edge.regulator.as_str(), edge.target.as_str())) {
                return Err(RegulonError::DuplicateEdge {
                    regulator: edge.regulator.clone(),
                    target: edge.target.clone(),
                    row,
                });
            }
        }
        Ok(Self { edges })
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn edges(&self) -> &[ScoredEdge] {
        &self.edges
    }

    pub fn get(&self, row: usize) -> Option<&ScoredEdge> {
        self.edges.get(row)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScoredEdge> {
        self.edges.iter()
    }

    /// Number of distinct regulators.
    pub fn n_regulators(&self) -> usize {
        self.edges
            .iter()
            .map(|e| e.regulator.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Number of distinct targets.
    pub fn n_targets(&self) -> usize {
        self.edges
            .iter()
            .map(|e| e.target.as_str())
            .collect::<HashSet<_>>()
            .len()
    }
}

impl<'a> IntoIterator for &'a RegulatoryTable {
    type Item = &'a ScoredEdge;
    type IntoIter = std::slice::Iter<'a, ScoredEdge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}
