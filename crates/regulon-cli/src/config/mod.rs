//! Configuration loading for the regulon CLI.
//! Reads regulon.toml from an explicit path, the REGULON_CONFIG env var, or the current directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use regulon_common::PruneConfig;
use regulon_prune::ColumnMapping;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub input: InputConfig,
    #[serde(default)]
    pub prune: PruneConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: PathBuf,
    /// Single-byte delimiter; inferred from the file extension when absent.
    pub delimiter: Option<char>,
    #[serde(default = "default_regulator_column")]
    pub regulator_column: String,
    #[serde(default = "default_target_column")]
    pub target_column: String,
    #[serde(default = "default_score_column")]
    pub score_column: String,
    #[serde(default = "default_association_column")]
    pub association_column: Option<String>,
    pub sign_column: Option<String>,
}

fn default_regulator_column()   -> String { "tf".to_string() }
fn default_target_column()      -> String { "gene".to_string() }
fn default_score_column()       -> String { "Gain".to_string() }
fn default_association_column() -> Option<String> { Some("Cor".to_string()) }

impl InputConfig {
    pub fn columns(&self) -> ColumnMapping {
        ColumnMapping {
            regulator: self.regulator_column.clone(),
            target: self.target_column.clone(),
            score: self.score_column.clone(),
            association: self.association_column.clone(),
            sign: self.sign_column.clone(),
        }
    }

    pub fn delimiter_byte(&self) -> anyhow::Result<Option<u8>> {
        match self.delimiter {
            None => Ok(None),
            Some(c) if c.is_ascii() => Ok(Some(c as u8)),
            Some(c) => anyhow::bail!("input.delimiter must be a single ASCII character, got {c:?}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Tsv,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Destination file; stdout when absent.
    pub path: Option<PathBuf>,
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

fn default_format() -> OutputFormat { OutputFormat::Json }

impl Default for OutputConfig {
    fn default() -> Self {
        Self { path: None, format: default_format() }
    }
}


impl Config {
    /// Resolve the config path: explicit argument, then REGULON_CONFIG, then ./regulon.toml.
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os("REGULON_CONFIG").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("regulon.toml"))
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            anyhow::bail!(
                "Config file not found: {}\n\
                 Pass a path or set REGULON_CONFIG.",
                path.display()
            );
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}
