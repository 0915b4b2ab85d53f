//! Results file storage
//!
//! The results file is pretty-printed JSON (2-space indent) and is
//! overwritten on every run.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

use crate::models::ResultsReport;

/// Save a report, creating parent directories as needed
pub fn save_report(report: &ResultsReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create results file {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, report).context("Failed to write results")?;
    writer.flush().context("Failed to write results")?;

    info!("Saved test results to {}", path.display());
    Ok(())
}

/// Load a report written by `save_report`
pub fn load_report(path: &Path) -> Result<ResultsReport> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open results file {}", path.display()))?;
    let reader = BufReader::new(file);

    let report: ResultsReport =
        serde_json::from_reader(reader).context("Failed to parse results")?;

    debug!("Loaded test results from {}", path.display());
    Ok(report)
}
