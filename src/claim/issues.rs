//! Issue aggregation across the claim package
//!
//! Issues come from four places in a fixed order: project eligibility
//! failures, flagged expenditure errors, documentation gaps, and the
//! preparer arrangement. The final list is stably sorted by severity, so
//! issues of equal severity keep their source order.

use crate::claim::docs::ClaimData;
use crate::claim::models::{ClaimIssue, ClaimSeverity};

/// Collect every issue in the package, sorted HIGH to LOW.
pub fn collect_issues(data: &ClaimData) -> Vec<ClaimIssue> {
    let mut issues = Vec::new();

    for project in &data.projects {
        let passed = project.five_question_test.passed();
        if passed == 0 {
            issues.push(ClaimIssue {
                severity: ClaimSeverity::High,
                category: "Eligibility".to_string(),
                issue: format!(
                    "Project {} ({}...) fails all 5 eligibility questions",
                    project.project_id,
                    truncate_chars(&project.title, 50)
                ),
                project: project.project_id.clone(),
                remediation: format!(
                    "Remove {} entirely from SR&ED claim. This is routine development, not SR&ED.",
                    project.project_id
                ),
            });
        } else if passed < 5 {
            let failed = project.five_question_test.failed_keys();
            issues.push(ClaimIssue {
                severity: ClaimSeverity::Medium,
                category: "Eligibility".to_string(),
                issue: format!(
                    "Project {}: {} question(s) failed in eligibility test",
                    project.project_id,
                    5 - passed
                ),
                project: project.project_id.clone(),
                remediation: format!(
                    "Address documentation gaps for failed questions: {}",
                    failed.join(", ")
                ),
            });
        }
    }

    for error in &data.expenditures.deliberate_errors {
        issues.push(ClaimIssue {
            severity: error.severity,
            category: "Expenditure".to_string(),
            issue: error.description.clone(),
            project: error
                .category
                .clone()
                .unwrap_or_else(|| "General".to_string()),
            remediation: error.remediation.clone(),
        });
    }

    for item in &data.documentation.evidence_items {
        if item.gap_flag {
            issues.push(ClaimIssue {
                severity: ClaimSeverity::High,
                category: "Documentation".to_string(),
                issue: format!(
                    "Documentation gap: {} to {} ({})",
                    item.gap_start.as_deref().unwrap_or("unknown"),
                    item.gap_end.as_deref().unwrap_or("unknown"),
                    item.gap_reason.as_deref().unwrap_or("unknown")
                ),
                project: item.project.clone(),
                remediation: "Prepare memo reconstructing experimental approach during gap period using git commits and code reviews.".to_string(),
            });
        }
    }

    if data.client.preparer.is_contingency_fee() {
        issues.push(ClaimIssue {
            severity: ClaimSeverity::Medium,
            category: "Preparer".to_string(),
            issue: format!(
                "Contingency fee preparer ({}) — elevated CRA audit risk",
                data.client.preparer.name
            ),
            project: "All".to_string(),
            remediation: "Contingency fees are legal but flagged by CRA. Ensure all documentation is meticulous.".to_string(),
        });
    }

    issues.sort_by_key(|issue| issue.severity.rank());
    issues
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
