//! regulon — prune a scored TF → target table into regulons.

mod config;
mod report;

use anyhow::Context;
use clap::Parser;
use regulon_common::PruneConfig;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "regulon", version, about = "Assign TF regulons from a scored regulatory table")]
struct Cli {
    /// Config file (defaults to $REGULON_CONFIG, then ./regulon.toml)
    config: Option<PathBuf>,

    /// Override the input table path
    #[arg(long)]
    input: Option<PathBuf>,

    /// Override the output path
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Replace the [prune] section with a TOML, YAML or JSON file
    #[arg(long)]
    prune: Option<PathBuf>,

    /// Override the strategy (A, B or C)
    #[arg(long)]
    strategy: Option<String>,

    /// Override the regulatory score threshold
    #[arg(long, allow_negative_numbers = true)]
    reg_thresh: Option<f64>,

    /// Override regulators kept per target (strategy A)
    #[arg(long, allow_negative_numbers = true)]
    n_tfs: Option<i64>,

    /// Override targets kept per regulator (strategy B)
    #[arg(long, allow_negative_numbers = true)]
    n_genes: Option<i64>,
}

impl Cli {
    fn apply(&self, config: &mut config::Config) -> anyhow::Result<()> {
        if let Some(p) = &self.prune {
            config.prune = PruneConfig::load(p)
                .with_context(|| format!("loading prune config {}", p.display()))?;
        }
        if let Some(p) = &self.input {
            config.input.path = p.clone();
        }
        if let Some(p) = &self.output {
            config.output.path = Some(p.clone());
        }
        if let Some(s) = &self.strategy {
            config.prune.strategy = s.clone();
        }
        if let Some(t) = self.reg_thresh {
            config.prune.reg_thresh = t;
        }
        if let Some(n) = self.n_tfs {
            config.prune.n_tfs = n;
        }
        if let Some(n) = self.n_genes {
            config.prune.n_genes = n;
        }
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout can carry the output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("regulon=debug,info")),
        )
        .init();

    let cli = Cli::parse();
    info!("regulon {}", env!("CARGO_PKG_VERSION"));

    let path = config::Config::resolve_path(cli.config.as_deref());
    let mut config = config::Config::load(&path)?;
    cli.apply(&mut config)?;
    info!(
        "Configuration loaded from {}. Strategy: {}, reg_thresh: {}",
        path.display(),
        config.prune.strategy,
        config.prune.reg_thresh
    );

    let report = report::run(&config)?;
    report::emit(&report, &config)?;
    info!("Run {} complete", report.run_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply() {
        let mut config =
            config::Config::from_toml_str("[input]\npath = \"a.csv\"\n").unwrap();
        let cli = Cli::parse_from([
            "regulon",
            "--input",
            "b.tsv",
            "--strategy",
            "B",
            "--n-genes",
            "7",
            "--reg-thresh",
            "-0.5",
        ]);
        cli.apply(&mut config).unwrap();
        assert_eq!(config.input.path, PathBuf::from("b.tsv"));
        assert_eq!(
            config.prune.to_params().unwrap(),
            regulon_common::PruneParams::top_targets_per_regulator(7, -0.5)
        );
    }

    #[test]
    fn test_prune_file_then_flags() {
        let dir = tempfile::tempdir().unwrap();
        let prune = dir.path().join("prune.yaml");
        std::fs::write(&prune, "strategy: A\nn_tfs: 3\nreg_thresh: 0.2\n").unwrap();

        let mut config =
            config::Config::from_toml_str("[input]\npath = \"a.csv\"\n").unwrap();
        let cli = Cli::parse_from([
            "regulon",
            "--prune",
            prune.to_str().unwrap(),
            "--n-tfs",
            "5",
        ]);
        cli.apply(&mut config).unwrap();
        assert_eq!(
            config.prune.to_params().unwrap(),
            regulon_common::PruneParams::top_regulators_per_target(5, 0.2)
        );
    }

    #[test]
    fn test_prune_file_errors_name_the_file() {
        let mut config =
            config::Config::from_toml_str("[input]\npath = \"a.csv\"\n").unwrap();
        let cli = Cli::parse_from(["regulon", "--prune", "/nonexistent/prune.json"]);
        let err = cli.apply(&mut config).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/prune.json"));
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
