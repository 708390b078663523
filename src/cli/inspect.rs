//! Inspect command - practice-inspection readiness scan

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use std::path::PathBuf;

use crate::config::Config;
use crate::inspection;
use crate::inspection::models::{ScanResult, Severity};
use crate::loader;
use crate::reporters::{self, OutputFormat};

/// Run the inspect command
pub fn run(
    data_dir: Option<PathBuf>,
    format: Option<String>,
    output: Option<PathBuf>,
    severity: Option<String>,
    fail_on: Option<String>,
    as_of: Option<NaiveDate>,
    config: &Config,
) -> Result<()> {
    let dir = data_dir
        .or_else(|| config.data.practice_dir.clone())
        .unwrap_or_else(|| PathBuf::from("data/practice"));
    let format: OutputFormat = format
        .or_else(|| config.output.format.clone())
        .unwrap_or_else(|| "text".to_string())
        .parse()?;
    let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());
    let fail_on = fail_on.or_else(|| config.ci.fail_on.clone());

    let data = loader::load_practice_data(&dir)
        .with_context(|| format!("Failed to load practice package from {}", dir.display()))?;

    let mut result = inspection::run_scan(&data, as_of);

    // Display filter only: counts and scores keep reflecting the full scan
    if let Some(min) = severity.as_deref().and_then(min_severity) {
        retain_at_or_above(&mut result, min);
    }

    let rendered = reporters::render_inspection(&result, format)?;
    super::write_output(&rendered, output.as_deref())?;

    if let Some(ref threshold) = fail_on {
        if threshold_exceeded(threshold, &result) {
            eprintln!("Failing due to --fail-on={} threshold", threshold);
            std::process::exit(1);
        }
    }

    Ok(())
}

fn min_severity(s: &str) -> Option<Severity> {
    match s {
        "critical" => Some(Severity::Critical),
        "warning" => Some(Severity::Warning),
        "info" => Some(Severity::Info),
        _ => None,
    }
}

/// Drop findings below `min` from every listing surface of the result.
fn retain_at_or_above(result: &mut ScanResult, min: Severity) {
    result.all_findings.retain(|f| f.severity >= min);
    for component in &mut result.components {
        component.findings.retain(|f| f.severity >= min);
    }
    for file in &mut result.file_results {
        file.findings.retain(|f| f.severity >= min);
    }
}

/// True when findings at or above the threshold exist in the full scan.
fn threshold_exceeded(fail_on: &str, result: &ScanResult) -> bool {
    match fail_on.to_lowercase().as_str() {
        "critical" => result.critical_count > 0,
        "warning" => result.critical_count > 0 || result.warning_count > 0,
        "info" => result.critical_count > 0 || result.warning_count > 0 || result.info_count > 0,
        _ => false,
    }
}
