//! JSON reporters
//!
//! Outputs the full scan result as pretty-printed JSON for machine
//! consumption, piping to jq, or further processing.

use anyhow::Result;

use crate::claim::models::ClaimReport;
use crate::inspection::models::ScanResult;

/// Render an inspection scan result as JSON
pub fn render_inspection(result: &ScanResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Render a claim readiness report as JSON
pub fn render_claim(report: &ClaimReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
