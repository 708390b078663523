//! CSV reporters
//!
//! One row per finding or issue, RFC 4180 quoting. Headers match the columns
//! reviewers already use for triage spreadsheets.

use anyhow::Result;

use crate::claim::models::ClaimReport;
use crate::inspection::models::ScanResult;

const INSPECTION_HEADER: &str =
    "Priority,Rule ID,Description,Location,Component,Issue,Remediation,Est. Fix Time";
const CLAIM_HEADER: &str = "Severity,Category,Issue,Project,Remediation";

/// Render all inspection findings as CSV, one finding per row.
pub fn render_inspection(result: &ScanResult) -> Result<String> {
    let mut out = String::from(INSPECTION_HEADER);
    out.push('\n');
    for f in &result.all_findings {
        push_row(
            &mut out,
            &[
                f.severity.tag(),
                &f.rule_id,
                &f.description,
                &f.location,
                &f.component,
                &f.issue,
                &f.remediation,
                &f.estimated_fix_time,
            ],
        );
    }
    Ok(out)
}

/// Render all claim issues as CSV, one issue per row.
pub fn render_claim(report: &ClaimReport) -> Result<String> {
    let mut out = String::from(CLAIM_HEADER);
    out.push('\n');
    for issue in &report.issues {
        push_row(
            &mut out,
            &[
                issue.severity.tag(),
                &issue.category,
                &issue.issue,
                &issue.project,
                &issue.remediation,
            ],
        );
    }
    Ok(out)
}

fn push_row(out: &mut String, fields: &[&str]) {
    let row: Vec<String> = fields.iter().map(|f| escape(f)).collect();
    out.push_str(&row.join(","));
    out.push('\n');
}

/// Quote a field when it contains a separator, quote, or line break.
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
