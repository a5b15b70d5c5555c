//! Regulatory table sources.
//!
//! The pruner only needs a [`RegulatoryTable`]; where it comes from is
//! behind [`TableSource`]. Implementations:
//! - [`DelimitedTableSource`] — CSV/TSV export of a TF network
//! - [`InMemoryTableSource`] — prebuilt edges (hosts and tests)

use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use regulon_common::{RegulatoryTable, RegulonError, Result, ScoredEdge, Sign};

/// Anything that can produce a regulatory table.
pub trait TableSource: Send + Sync {
    fn load(&self) -> Result<RegulatoryTable>;
}

// ── Column mapping ────────────────────────────────────────────────────────────

/// Column names in a delimited TF network table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    #[serde(default = "default_regulator_column")]
    pub regulator: String,
    #[serde(default = "default_target_column")]
    pub target: String,
    #[serde(default = "default_score_column")]
    pub score: String,
    /// Signed association column; used when present in the file.
    #[serde(default = "default_association_column")]
    pub association: Option<String>,
    /// Explicit sign column (`+`/`-`, `positive`/`negative`).
    #[serde(default)]
    pub sign: Option<String>,
}

fn default_regulator_column() -> String { "tf".to_string() }
fn default_target_column() -> String { "gene".to_string() }
fn default_score_column() -> String { "Gain".to_string() }
fn default_association_column() -> Option<String> { Some("Cor".to_string()) }

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            regulator: default_regulator_column(),
            target: default_target_column(),
            score: default_score_column(),
            association: default_association_column(),
            sign: None,
        }
    }
}

struct ColumnIndex {
    regulator: usize,
    target: usize,
    score: usize,
    association: Option<usize>,
    sign: Option<usize>,
}

impl ColumnIndex {
    fn resolve(headers: &csv::StringRecord, mapping: &ColumnMapping) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| {
                RegulonError::Config(format!("column {name:?} not found in table header"))
            })
        };
        let sign = match &mapping.sign {
            Some(name) => Some(require(name)?),
            None => None,
        };
        Ok(Self {
            regulator: require(&mapping.regulator)?,
            target: require(&mapping.target)?,
            score: require(&mapping.score)?,
            association: mapping.association.as_deref().and_then(|name| find(name)),
            sign,
        })
    }
}

fn is_missing(value: &str) -> bool {
    value.is_empty() || value.eq_ignore_ascii_case("na") || value.eq_ignore_ascii_case("nan")
}

/// Parse a delimited table from any reader.
///
/// The sign comes from the association column when it has a value, else
/// from the sign column, else defaults to positive.
pub fn read_table<R: Read>(reader: R, delimiter: u8, mapping: &ColumnMapping) -> Result<RegulatoryTable> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let cols = ColumnIndex::resolve(&headers, mapping)?;
    if cols.association.is_none() && cols.sign.is_none() {
        debug!("No association or sign column; all edges treated as positive");
    }

    let mut edges = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let field = |i: usize| record.get(i).unwrap_or("");

        let score: f64 = field(cols.score).parse().map_err(|_| RegulonError::InvalidEdge {
            row,
            reason: format!("score {:?} is not a number", field(cols.score)),
        })?;
        let sign = match cols.sign {
            Some(i) => field(i).parse::<Sign>().map_err(|_| RegulonError::InvalidEdge {
                row,
                reason: format!("sign {:?} is not recognised", field(i)),
            })?,
            None => Sign::Positive,
        };
        let mut edge = ScoredEdge::new(field(cols.regulator), field(cols.target), score, sign);

        if let Some(i) = cols.association {
            let raw = field(i);
            if !is_missing(raw) {
                let association: f64 = raw.parse().map_err(|_| RegulonError::InvalidEdge {
                    row,
                    reason: format!("association {raw:?} is not a number"),
                })?;
                edge = edge.with_association(association);
            }
        }
        edges.push(edge);
    }

    RegulatoryTable::new(edges)
}

// ── Delimited file source ─────────────────────────────────────────────────────

/// CSV or TSV file on disk.
#[derive(Debug, Clone)]
pub struct DelimitedTableSource {
    path: PathBuf,
    delimiter: Option<u8>,
    columns: ColumnMapping,
}

impl DelimitedTableSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: None,
            columns: ColumnMapping::default(),
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    pub fn with_columns(mut self, columns: ColumnMapping) -> Self {
        self.columns = columns;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Explicit delimiter, else tab for `.tsv`/`.txt`/`.tab`, else comma.
    pub fn delimiter(&self) -> u8 {
        self.delimiter.unwrap_or_else(|| {
            match self.path.extension().and_then(|e| e.to_str()) {
                Some(ext) if ["tsv", "txt", "tab"].contains(&ext.to_ascii_lowercase().as_str()) => b'\t',
                _ => b',',
            }
        })
    }
}

impl TableSource for DelimitedTableSource {
    fn load(&self) -> Result<RegulatoryTable> {
        debug!("Loading regulatory table from {:?}", self.path);
        let file = std::fs::File::open(&self.path)?;
        let table = read_table(file, self.delimiter(), &self.columns)?;
        info!(
            "Loaded {} edges ({} regulators, {} targets) from {:?}",
            table.len(),
            table.n_regulators(),
            table.n_targets(),
            self.path
        );
        Ok(table)
    }
}

// ── In-memory source ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct InMemoryTableSource {
    edges: Vec<ScoredEdge>,
}

impl InMemoryTableSource {
    pub fn new(edges: Vec<ScoredEdge>) -> Self {
        Self { edges }
    }

    pub fn with(mut self, regulator: &str, target: &str, score: f64, sign: Sign) -> Self {
        self.edges.push(ScoredEdge::new(regulator, target, score, sign));
        self
    }
}

impl TableSource for InMemoryTableSource {
    fn load(&self) -> Result<RegulatoryTable> {
        RegulatoryTable::new(self.edges.clone())
    }
}
