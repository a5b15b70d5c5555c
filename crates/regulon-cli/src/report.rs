//! One pruning run: load, assign, write.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;
use uuid::Uuid;

use regulon_prune::{
    assign_regulons_with, write_tsv, DelimitedTableSource, RegulonSet, TableSource,
};

use crate::config::{Config, OutputFormat};

/// JSON envelope written for `format = "json"`.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub input: PathBuf,
    pub input_rows: usize,
    pub regulons: RegulonSet,
}

impl RunReport {
    pub fn write<W: Write>(&self, format: OutputFormat, writer: W) -> Result<()> {
        match format {
            OutputFormat::Json => serde_json::to_writer_pretty(writer, self)?,
            OutputFormat::Tsv => write_tsv(&self.regulons, writer)?,
        }
        Ok(())
    }
}

/// Load the table named by `config`, prune it, and return the report.
pub fn run(config: &Config) -> Result<RunReport> {
    let params = config.prune.to_params()?;
    let options = config.prune.options();

    let mut source = DelimitedTableSource::new(&config.input.path).with_columns(config.input.columns());
    if let Some(d) = config.input.delimiter_byte()? {
        source = source.with_delimiter(d);
    }
    let table = source
        .load()
        .with_context(|| format!("reading {}", config.input.path.display()))?;

    let regulons = assign_regulons_with(&table, &params, &options)?;
    info!("{}", regulons.summary());

    Ok(RunReport {
        run_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        input: config.input.path.clone(),
        input_rows: table.len(),
        regulons,
    })
}

/// Write to the configured file, or stdout.
pub fn emit(report: &RunReport, config: &Config) -> Result<()> {
    match &config.output.path {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            let mut writer = std::io::BufWriter::new(file);
            report.write(config.output.format, &mut writer)?;
            writer.flush()?;
            info!("Wrote {} regulons to {}", report.regulons.len(), path.display());
        }
        None => {
            let stdout = std::io::stdout();
            report.write(config.output.format, stdout.lock())?;
        }
    }
    Ok(())
}
