//! Pruning parameters and their file-backed configuration.
//!
//! [`PruneParams`] is the validated, fully-enumerated value the pruner takes.
//! [`PruneConfig`] is the loose user-facing form (a strategy token plus raw
//! numbers) read from TOML, YAML or JSON; [`PruneConfig::to_params`] turns
//! one into the other.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{RegulonError, Result};

// ── Strategy ──────────────────────────────────────────────────────────────────

/// Regulon selection policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Strategy {
    /// Strategy A: keep the `n_tfs` best regulators of every target.
    TopRegulatorsPerTarget { n_tfs: usize },
    /// Strategy B: keep the `n_genes` best targets of every regulator.
    TopTargetsPerRegulator { n_genes: usize },
    /// Strategy C: keep every edge above the threshold.
    GlobalThreshold,
}

/// Bare strategy tag, as written in configuration (`A`, `B`, `C`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyToken {
    A,
    B,
    C,
}

impl FromStr for StrategyToken {
    type Err = RegulonError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(StrategyToken::A),
            "B" => Ok(StrategyToken::B),
            "C" => Ok(StrategyToken::C),
            _ => Err(RegulonError::UnsupportedStrategy(s.to_string())),
        }
    }
}

impl Strategy {
    pub fn token(&self) -> StrategyToken {
        match self {
            Strategy::TopRegulatorsPerTarget { .. } => StrategyToken::A,
            Strategy::TopTargetsPerRegulator { .. } => StrategyToken::B,
            Strategy::GlobalThreshold => StrategyToken::C,
        }
    }

    /// Per-group cap, if the strategy has one.
    pub fn cap(&self) -> Option<usize> {
        match *self {
            Strategy::TopRegulatorsPerTarget { n_tfs } => Some(n_tfs),
            Strategy::TopTargetsPerRegulator { n_genes } => Some(n_genes),
            Strategy::GlobalThreshold => None,
        }
    }
}

impl fmt::Display for StrategyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StrategyToken::A => "A",
            StrategyToken::B => "B",
            StrategyToken::C => "C",
        };
        f.write_str(s)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::TopRegulatorsPerTarget { n_tfs } => write!(f, "A (n_tfs={n_tfs})"),
            Strategy::TopTargetsPerRegulator { n_genes } => write!(f, "B (n_genes={n_genes})"),
            Strategy::GlobalThreshold => f.write_str("C"),
        }
    }
}

// ── Validated parameters ─────────────────────────────────────────────────────

/// Parameters for one pruning call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PruneParams {
    pub strategy: Strategy,
    /// Edges must score strictly above this to be retained.
    pub reg_thresh: f64,
}

impl PruneParams {
    pub fn top_regulators_per_target(n_tfs: usize, reg_thresh: f64) -> Self {
        Self { strategy: Strategy::TopRegulatorsPerTarget { n_tfs }, reg_thresh }
    }

    pub fn top_targets_per_regulator(n_genes: usize, reg_thresh: f64) -> Self {
        Self { strategy: Strategy::TopTargetsPerRegulator { n_genes }, reg_thresh }
    }

    pub fn global_threshold(reg_thresh: f64) -> Self {
        Self { strategy: Strategy::GlobalThreshold, reg_thresh }
    }

    /// Check the threshold, then the cap.
    pub fn validate(&self) -> Result<()> {
        self.validate_threshold()?;
        self.validate_cap()
    }

    /// `reg_thresh` must be finite whatever the strategy.
    pub fn validate_threshold(&self) -> Result<()> {
        if !self.reg_thresh.is_finite() {
            return Err(RegulonError::invalid_parameter(
                "reg_thresh",
                format!("must be a finite real number, got {}", self.reg_thresh),
            ));
        }
        Ok(())
    }

    /// The active strategy's cap, if any, must be positive.
    pub fn validate_cap(&self) -> Result<()> {
        match self.strategy {
            Strategy::TopRegulatorsPerTarget { n_tfs: 0 } => Err(RegulonError::invalid_parameter(
                "n_tfs",
                "must be a positive integer, got 0",
            )),
            Strategy::TopTargetsPerRegulator { n_genes: 0 } => Err(RegulonError::invalid_parameter(
                "n_genes",
                "must be a positive integer, got 0",
            )),
            _ => Ok(()),
        }
    }
}

// ── Execution options ────────────────────────────────────────────────────────

/// Knobs that change how pruning runs but never what it returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PruneOptions {
    /// Rank groups in parallel once there are at least this many.
    /// 0 disables parallelism.
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

impl Default for PruneOptions {
    fn default() -> Self {
        Self { parallel_threshold: default_parallel_threshold() }
    }
}

// ── File-backed configuration ────────────────────────────────────────────────

/// User-facing pruning configuration. Absent keys take the defaults below;
/// present keys are validated, never silently corrected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PruneConfig {
    /// Strategy token: A, B or C
    #[serde(default = "default_strategy")]
    pub strategy: String,

    /// Regulators kept per target (strategy A)
    #[serde(default = "default_n_tfs")]
    pub n_tfs: i64,

    /// Targets kept per regulator (strategy B)
    #[serde(default = "default_n_genes")]
    pub n_genes: i64,

    /// Minimum regulatory score (exclusive)
    #[serde(default = "default_reg_thresh")]
    pub reg_thresh: f64,

    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

fn default_strategy() -> String { "A".to_string() }
fn default_n_tfs() -> i64 { 10 }
fn default_n_genes() -> i64 { 50 }
fn default_reg_thresh() -> f64 { 0.01 }
fn default_parallel_threshold() -> usize { 64 }

impl Default for PruneConfig {
    fn default() -> Self {
        Self {
            strategy: default_strategy(),
            n_tfs: default_n_tfs(),
            n_genes: default_n_genes(),
            reg_thresh: default_reg_thresh(),
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

fn positive_cap(name: &'static str, value: i64) -> Result<usize> {
    if value <= 0 {
        return Err(RegulonError::invalid_parameter(
            name,
            format!("must be a positive integer, got {value}"),
        ));
    }
    usize::try_from(value).map_err(|_| {
        RegulonError::invalid_parameter(name, format!("{value} does not fit in usize"))
    })
}

impl PruneConfig {
    /// Convert to validated [`PruneParams`]. Only the cap belonging to the
    /// chosen strategy is checked.
    pub fn to_params(&self) -> Result<PruneParams> {
        if !self.reg_thresh.is_finite() {
            return Err(RegulonError::invalid_parameter(
                "reg_thresh",
                format!("must be a finite real number, got {}", self.reg_thresh),
            ));
        }
        let strategy = match self.strategy.parse::<StrategyToken>()? {
            StrategyToken::A => Strategy::TopRegulatorsPerTarget {
                n_tfs: positive_cap("n_tfs", self.n_tfs)?,
            },
            StrategyToken::B => Strategy::TopTargetsPerRegulator {
                n_genes: positive_cap("n_genes", self.n_genes)?,
            },
            StrategyToken::C => Strategy::GlobalThreshold,
        };
        let params = PruneParams { strategy, reg_thresh: self.reg_thresh };
        params.validate()?;
        Ok(params)
    }

    pub fn options(&self) -> PruneOptions {
        PruneOptions { parallel_threshold: self.parallel_threshold }
    }

    /// Load from a file, picking the format from its extension
    /// (`.toml`, `.yaml`/`.yml`, `.json`).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref() {
            Some("toml") => Self::from_toml(path),
            Some("yaml" | "yml") => Self::from_yaml(path),
            Some("json") => Self::from_json(path),
            _ => Err(RegulonError::Config(format!(
                "unrecognised prune config format: {}",
                path.display()
            ))),
        }
    }

    /// Load from TOML file
    pub fn from_toml(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| RegulonError::Config(e.to_string()))
    }

    /// Load from YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| RegulonError::Config(e.to_string()))
    }

    /// Load from JSON file
    pub fn from_json(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let cfg = PruneConfig::default();
        assert_eq!(cfg.strategy, "A");
        assert_eq!(cfg.n_tfs, 10);
        assert_eq!(cfg.n_genes, 50);
        assert!((cfg.reg_thresh - 0.01).abs() < 1e-12);
        assert_eq!(
            cfg.to_params().unwrap(),
            PruneParams::top_regulators_per_target(10, 0.01)
        );
    }

    #[test]
    fn test_strategy_tokens() {
        assert_eq!("a".parse::<StrategyToken>().unwrap(), StrategyToken::A);
        assert_eq!(" C ".parse::<StrategyToken>().unwrap(), StrategyToken::C);
        let err = "D".parse::<StrategyToken>().unwrap_err();
        assert!(matches!(err, RegulonError::UnsupportedStrategy(ref s) if s == "D"));
    }

    #[test]
    fn test_unknown_strategy_in_config() {
        let cfg = PruneConfig { strategy: "top".to_string(), ..Default::default() };
        assert!(matches!(cfg.to_params(), Err(RegulonError::UnsupportedStrategy(_))));
    }

    #[test]
    fn test_non_positive_caps_rejected() {
        let cfg = PruneConfig { n_tfs: 0, ..Default::default() };
        assert!(matches!(
            cfg.to_params(),
            Err(RegulonError::InvalidParameter { name: "n_tfs", .. })
        ));

        let cfg = PruneConfig { strategy: "B".into(), n_genes: -5, ..Default::default() };
        assert!(matches!(
            cfg.to_params(),
            Err(RegulonError::InvalidParameter { name: "n_genes", .. })
        ));
    }

    #[test]
    fn test_unused_cap_is_not_checked() {
        // Strategy C ignores both caps.
        let cfg = PruneConfig { strategy: "C".into(), n_tfs: 0, n_genes: -1, ..Default::default() };
        assert_eq!(cfg.to_params().unwrap(), PruneParams::global_threshold(0.01));
    }

    #[test]
    fn test_nan_threshold_rejected_for_every_strategy() {
        for token in ["A", "B", "C"] {
            let cfg = PruneConfig {
                strategy: token.into(),
                reg_thresh: f64::NAN,
                ..Default::default()
            };
            assert!(
                matches!(cfg.to_params(), Err(RegulonError::InvalidParameter { name: "reg_thresh", .. })),
                "strategy {token} accepted NaN"
            );
        }
    }

    #[test]
    fn test_params_validate_zero_cap() {
        let err = PruneParams::top_targets_per_regulator(0, 0.1).validate().unwrap_err();
        assert!(err.to_string().contains("n_genes"));
        assert!(PruneParams::global_threshold(f64::INFINITY).validate().is_err());
        assert!(PruneParams::global_threshold(-1.0).validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let cfg: PruneConfig = toml::from_str("strategy = \"B\"\nn_genes = 25\n").unwrap();
        assert_eq!(cfg.n_genes, 25);
        assert_eq!(cfg.n_tfs, 10);
        assert_eq!(cfg.parallel_threshold, 64);
        assert_eq!(cfg.to_params().unwrap(), PruneParams::top_targets_per_regulator(25, 0.01));
    }

    #[test]
    fn test_yaml_config() {
        let cfg: PruneConfig = serde_yaml::from_str("strategy: C\nreg_thresh: 0.5\n").unwrap();
        assert_eq!(cfg.to_params().unwrap(), PruneParams::global_threshold(0.5));
    }

    #[test]
    fn test_load_each_format() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("prune.toml");
        std::fs::write(&toml_path, "strategy = \"B\"\nn_genes = 4\n").unwrap();
        assert_eq!(
            PruneConfig::load(&toml_path).unwrap().to_params().unwrap(),
            PruneParams::top_targets_per_regulator(4, 0.01)
        );

        let yaml_path = dir.path().join("prune.yml");
        std::fs::write(&yaml_path, "strategy: C\nreg_thresh: 0.5\n").unwrap();
        assert_eq!(
            PruneConfig::from_yaml(&yaml_path).unwrap(),
            PruneConfig::load(&yaml_path).unwrap()
        );
        assert_eq!(
            PruneConfig::load(&yaml_path).unwrap().to_params().unwrap(),
            PruneParams::global_threshold(0.5)
        );

        let json_path = dir.path().join("prune.json");
        std::fs::write(&json_path, r#"{"strategy": "a", "n_tfs": 2, "parallel_threshold": 0}"#).unwrap();
        let cfg = PruneConfig::load(&json_path).unwrap();
        assert_eq!(cfg.options().parallel_threshold, 0);
        assert_eq!(cfg.to_params().unwrap(), PruneParams::top_regulators_per_target(2, 0.01));
    }

    #[test]
    fn test_load_rejects_unknown_extension_and_bad_content() {
        let dir = tempfile::tempdir().unwrap();
        let ini = dir.path().join("prune.ini");
        std::fs::write(&ini, "strategy = A").unwrap();
        assert!(matches!(PruneConfig::load(&ini), Err(RegulonError::Config(_))));

        let bad = dir.path().join("prune.toml");
        std::fs::write(&bad, "n_tfs = \"many\"").unwrap();
        assert!(matches!(PruneConfig::from_toml(&bad), Err(RegulonError::Config(_))));

        assert!(matches!(
            PruneConfig::from_json(dir.path().join("missing.json")),
            Err(RegulonError::Io(_))
        ));
    }

    #[test]
    fn test_cap_and_threshold_checked_separately() {
        let params = PruneParams::top_regulators_per_target(0, f64::NAN);
        assert!(matches!(
            params.validate_threshold(),
            Err(RegulonError::InvalidParameter { name: "reg_thresh", .. })
        ));
        assert!(matches!(
            params.validate_cap(),
            Err(RegulonError::InvalidParameter { name: "n_tfs", .. })
        ));
        assert!(PruneParams::global_threshold(f64::NAN).validate_cap().is_ok());
    }

    #[test]
    fn test_strategy_display() {
        assert_eq!(PruneParams::top_regulators_per_target(3, 0.0).strategy.to_string(), "A (n_tfs=3)");
        assert_eq!(Strategy::GlobalThreshold.token().to_string(), "C");
        assert_eq!(Strategy::GlobalThreshold.cap(), None);
    }
}
