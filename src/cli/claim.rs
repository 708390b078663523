//! Claim command - SR&ED claim readiness scan

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use std::path::PathBuf;

use crate::claim;
use crate::claim::models::{ClaimReport, ClaimSeverity};
use crate::config::Config;
use crate::loader;
use crate::reporters::{self, OutputFormat};

/// Run the claim command
pub fn run(
    data_dir: Option<PathBuf>,
    format: Option<String>,
    output: Option<PathBuf>,
    fail_on: Option<String>,
    as_of: Option<NaiveDate>,
    config: &Config,
) -> Result<()> {
    let dir = data_dir
        .or_else(|| config.data.claim_dir.clone())
        .unwrap_or_else(|| PathBuf::from("data/claim"));
    let format: OutputFormat = format
        .or_else(|| config.output.format.clone())
        .unwrap_or_else(|| "text".to_string())
        .parse()?;
    let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());
    let fail_on = fail_on.or_else(|| config.ci.fail_on.clone());

    let data = loader::load_claim_data(&dir)
        .with_context(|| format!("Failed to load claim package from {}", dir.display()))?;

    let report = claim::run_claim_scan(&data, as_of);

    let rendered = reporters::render_claim(&report, format)?;
    super::write_output(&rendered, output.as_deref())?;

    if let Some(ref threshold) = fail_on {
        if threshold_exceeded(threshold, &report) {
            eprintln!("Failing due to --fail-on={} threshold", threshold);
            std::process::exit(1);
        }
    }

    Ok(())
}

/// True when issues at or above the threshold exist.
fn threshold_exceeded(fail_on: &str, report: &ClaimReport) -> bool {
    let floor = match fail_on.to_lowercase().as_str() {
        "high" => ClaimSeverity::High,
        "medium" => ClaimSeverity::Medium,
        "low" => ClaimSeverity::Low,
        _ => return false,
    };
    report
        .issues
        .iter()
        .any(|issue| issue.severity.rank() <= floor.rank())
}
