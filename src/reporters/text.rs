//! Plain-text reporters
//!
//! Both reports follow a fixed layout so they can be diffed between runs and
//! filed alongside working papers. No terminal styling here; the CLI styles
//! its own status lines around the report body.

use anyhow::Result;

use crate::claim::constants::ITC_CCPC_ENHANCED_RATE;
use crate::claim::models::ClaimReport;
use crate::inspection::models::{GroupStatus, ScanResult, Severity};

/// Render the inspection scan as the filing-ready text report.
pub fn render_inspection(result: &ScanResult) -> Result<String> {
    let heavy = "=".repeat(70);
    let light = "-".repeat(70);
    let mut lines: Vec<String> = Vec::new();

    lines.push(heavy.clone());
    lines.push("CPA PRACTICE INSPECTION READINESS REPORT".to_string());
    lines.push(heavy.clone());
    lines.push(String::new());
    lines.push(format!("Firm:            {}", result.firm_name));
    lines.push(format!("License:         {}", result.license_number));
    lines.push(format!("Jurisdiction:    {}", result.jurisdiction));
    lines.push(format!("Report Date:     {}", result.report_date));
    lines.push(format!("Inspection Due:  {}", result.next_inspection_due));
    lines.push(String::new());
    lines.push(light.clone());
    lines.push("EXECUTIVE SUMMARY".to_string());
    lines.push(light.clone());
    lines.push(String::new());
    lines.push(format!("Readiness Score:     {:.1}%", result.readiness_score));
    lines.push(format!("Predicted Outcome:   {}", result.predicted_outcome));
    lines.push(format!("Assertions Checked:  {}", result.total_assertions));
    lines.push(format!("Assertions Passed:   {}", result.passed_assertions));
    lines.push(format!("Critical Gaps:       {}", result.critical_count));
    lines.push(format!("Warnings:            {}", result.warning_count));
    lines.push(format!("Info Items:          {}", result.info_count));
    lines.push(format!("Files Scanned:       {}", result.files_scanned));
    lines.push(String::new());

    lines.push(light.clone());
    lines.push("FIRM-LEVEL COMPONENT STATUS".to_string());
    lines.push(light.clone());
    lines.push(String::new());
    for comp in &result.components {
        lines.push(format!("[{}] {}", status_label(comp.status()), comp.name));
        if comp.findings.is_empty() {
            lines.push("       No issues found.".to_string());
        } else {
            for f in &comp.findings {
                lines.push(format!(
                    "       [{}] {}: {}",
                    f.severity.tag(),
                    f.rule_id,
                    f.issue
                ));
            }
        }
        lines.push(String::new());
    }

    lines.push(light.clone());
    lines.push("ENGAGEMENT FILE RESULTS".to_string());
    lines.push(light.clone());
    lines.push(String::new());
    for fr in &result.file_results {
        lines.push(format!(
            "[{}] {} ({})",
            file_label(&fr.overall_status),
            fr.client_name,
            fr.file_id
        ));
        lines.push(format!(
            "       Type: {} | Standard: {}",
            title_case(&fr.engagement_type),
            fr.standard
        ));
        lines.push(format!(
            "       Partner: {} | Prepared by: {}",
            fr.engagement_partner, fr.prepared_by
        ));
        lines.push(format!(
            "       Assertions: {}/{} passed",
            fr.assertions_passed, fr.assertions_total
        ));
        for f in &fr.findings {
            lines.push(format!(
                "       [{}] {}: {}",
                f.severity.tag(),
                f.rule_id,
                f.issue
            ));
        }
        lines.push(String::new());
    }

    lines.push(light.clone());
    lines.push("PRIORITIZED REMEDIATION PLAN".to_string());
    lines.push(light);
    lines.push(String::new());
    let mut index = 0usize;
    for severity in [Severity::Critical, Severity::Warning, Severity::Info] {
        for f in result.all_findings.iter().filter(|f| f.severity == severity) {
            index += 1;
            lines.push(format!(
                "{}. [{}] {} — {}",
                index,
                severity.tag(),
                f.rule_id,
                f.location
            ));
            lines.push(format!("   Issue: {}", f.issue));
            lines.push(format!("   Fix: {}", f.remediation));
            lines.push(format!("   Est. Time: {}", f.estimated_fix_time));
            lines.push(String::new());
        }
    }

    lines.push(heavy.clone());
    lines.push("END OF REPORT".to_string());
    lines.push(heavy);

    Ok(lines.join("\n"))
}

/// Render the claim readiness report as the filing-ready text report.
pub fn render_claim(report: &ClaimReport) -> Result<String> {
    let bar = "=".repeat(50);
    let mut out = String::new();

    out.push_str("SR&ED CLAIM READINESS REPORT\n");
    out.push_str(&bar);
    out.push('\n');
    out.push_str(&format!("Client: {}\n", report.company_name));
    out.push_str(&format!("Business Number: {}\n", report.business_number));
    out.push_str(&format!("Fiscal Year End: {}\n", report.fiscal_year_end));
    out.push_str(&format!("Report Generated: {}\n", report.report_date));
    out.push('\n');
    out.push_str(&format!(
        "OVERALL READINESS SCORE: {}/100 ({})\n",
        report.overall_score, report.risk_band
    ));
    out.push('\n');
    out.push_str("SCORE BREAKDOWN:\n");
    out.push_str(&format!("- Eligibility: {}/100\n", report.subscores.eligibility));
    out.push_str(&format!(
        "- Expenditure Accuracy: {}/100\n",
        report.subscores.expenditure
    ));
    out.push_str(&format!(
        "- Documentation: {}/100\n",
        report.subscores.documentation
    ));
    out.push_str(&format!(
        "- Form Completeness: {}/100\n",
        report.subscores.form
    ));
    out.push('\n');
    out.push_str("ISSUES IDENTIFIED:\n");
    for (i, issue) in report.issues.iter().enumerate() {
        out.push_str(&format!("\n{}. [{}] {}", i + 1, issue.severity, issue.issue));
        out.push_str(&format!("\n   Remediation: {}\n", issue.remediation));
    }

    let as_filed = report.expenditures.as_filed;
    let corrected = report.expenditures.corrected;
    out.push_str("\nEXPENDITURE COMPARISON:\n");
    out.push_str(&bar);
    out.push('\n');
    out.push_str("                    As Filed        Corrected       Delta\n");
    out.push_str(&comparison_row("Salaries:", as_filed.salaries, corrected.salaries));
    out.push_str(&comparison_row(
        "Materials:",
        as_filed.materials,
        corrected.materials,
    ));
    out.push_str(&comparison_row(
        "Contracts:",
        as_filed.contracts,
        corrected.contracts,
    ));
    out.push_str(&comparison_row("PPA:", as_filed.ppa, corrected.ppa));
    out.push_str(&comparison_row("Total:", as_filed.total, corrected.total));
    out.push('\n');

    // The comparison view quotes the flat enhanced rate on both states; the
    // tiered federal estimate lives in the ITC section of the JSON output.
    let flat_after = (corrected.total * ITC_CCPC_ENHANCED_RATE).round();
    out.push_str("ESTIMATED ITC:\n");
    out.push_str(&format!(
        "Federal (35%):      {:>15} {:>15}\n",
        fmt_currency(report.itc.as_filed_federal),
        fmt_currency(flat_after)
    ));
    out.push_str(&format!("Audit Risk:         {:>15} {:>15}\n", "HIGH", "LOW"));
    out.push('\n');

    out.push_str("REMEDIATION PLAN:\n");
    for (i, issue) in report.issues.iter().enumerate() {
        out.push_str(&format!(
            "\n{}. {} (Impact: {}, Category: {})",
            i + 1,
            issue.remediation,
            issue.severity,
            issue.category
        ));
    }
    out.push('\n');

    Ok(out)
}

fn comparison_row(label: &str, as_filed: f64, corrected: f64) -> String {
    format!(
        "{:<20}{:>15} {:>15} {:>15}\n",
        label,
        fmt_currency(as_filed),
        fmt_currency(corrected),
        fmt_currency(corrected - as_filed)
    )
}

fn status_label(status: GroupStatus) -> &'static str {
    match status {
        GroupStatus::Pass => "PASS",
        GroupStatus::Warning => "WARN",
        GroupStatus::Critical => "FAIL",
    }
}

fn file_label(overall_status: &str) -> String {
    match overall_status {
        "pass" => "PASS".to_string(),
        "pass_with_warning" => "WARN".to_string(),
        "fail" => "FAIL".to_string(),
        other => other.to_uppercase(),
    }
}

/// Whole-dollar currency with comma grouping, e.g. `$82,500` / `-$1,200`.
pub(crate) fn fmt_currency(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let sign = if rounded < 0 { "-" } else { "" };
    let digits = rounded.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}")
}

/// Capitalize the first letter of each word, lowercasing the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut boundary = true;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if boundary {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            boundary = false;
        } else {
            out.push(ch);
            boundary = true;
        }
    }
    out
}
