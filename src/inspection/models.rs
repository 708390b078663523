//! Data models for the practice-inspection pipeline
//!
//! Findings are immutable value objects; group statuses are derived from the
//! contained findings on read, never stored separately.

use serde::{Deserialize, Serialize};

use crate::inspection::evidence::EvidenceSummary;

/// Severity levels for inspection findings
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Critical,
}

impl Severity {
    /// Uppercase tag used in report text, e.g. `[CRITICAL]`.
    pub fn tag(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// A single detected compliance issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Stable rule identifier, e.g. "GOV-01"
    pub rule_id: String,
    /// Human label of the check
    pub description: String,
    pub severity: Severity,
    /// Where the issue was found ("Firm-Level" or "{client} ({file_id})")
    pub location: String,
    /// Functional area that raised it
    pub component: String,
    pub issue: String,
    pub remediation: String,
    /// Free-text duration estimate, parsed later for aggregate hour totals
    pub estimated_fix_time: String,
}

/// Derived pass/warn/fail status of a findings group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupStatus {
    Pass,
    Warning,
    Critical,
}

impl GroupStatus {
    /// Worst severity wins: critical beats warning beats pass.
    pub fn from_findings(findings: &[Finding]) -> Self {
        if findings.iter().any(|f| f.severity == Severity::Critical) {
            GroupStatus::Critical
        } else if findings.iter().any(|f| f.severity == Severity::Warning) {
            GroupStatus::Warning
        } else {
            GroupStatus::Pass
        }
    }
}

/// Summary of findings by severity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindingsSummary {
    pub critical: usize,
    pub warning: usize,
    pub info: usize,
    pub total: usize,
}

impl FindingsSummary {
    pub fn from_findings(findings: &[Finding]) -> Self {
        let mut summary = Self::default();
        for f in findings {
            match f.severity {
                Severity::Critical => summary.critical += 1,
                Severity::Warning => summary.warning += 1,
                Severity::Info => summary.info += 1,
            }
            summary.total += 1;
        }
        summary
    }
}

/// One firm-level quality-management component and its findings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentResult {
    pub name: String,
    pub description: String,
    pub findings: Vec<Finding>,
}

impl ComponentResult {
    pub fn status(&self) -> GroupStatus {
        GroupStatus::from_findings(&self.findings)
    }

    pub fn critical_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Critical)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
            .count()
    }
}

/// One engagement file's metadata and findings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileResult {
    pub file_id: String,
    pub client_name: String,
    pub engagement_type: String,
    pub standard: String,
    pub engagement_partner: String,
    pub prepared_by: String,
    /// Preparer-recorded tallies carried through for display; the global
    /// base ratio is recomputed from the document trees instead.
    pub assertions_passed: usize,
    pub assertions_total: usize,
    pub overall_status: String,
    pub findings: Vec<Finding>,
}

impl FileResult {
    pub fn status(&self) -> GroupStatus {
        GroupStatus::from_findings(&self.findings)
    }
}

/// Predicted inspection outcome label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "Does Not Meet Requirements")]
    DoesNotMeet,
    #[serde(rename = "Meets Requirements (with notes)")]
    MeetsWithNotes,
    #[serde(rename = "Meets Requirements")]
    Meets,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::DoesNotMeet => write!(f, "Does Not Meet Requirements"),
            Outcome::MeetsWithNotes => write!(f, "Meets Requirements (with notes)"),
            Outcome::Meets => write!(f, "Meets Requirements"),
        }
    }
}

/// Complete result of one practice inspection scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    pub firm_name: String,
    pub license_number: String,
    pub jurisdiction: String,
    pub next_inspection_due: String,
    /// ISO date the scan was run against (supplied, not wall clock)
    pub report_date: String,
    pub days_until_inspection: Option<i64>,
    /// 0-100, one decimal
    pub readiness_score: f64,
    pub predicted_outcome: Outcome,
    pub total_assertions: usize,
    pub passed_assertions: usize,
    pub critical_count: usize,
    pub warning_count: usize,
    pub info_count: usize,
    pub files_scanned: usize,
    /// Score/outcome assuming every critical item is resolved
    pub post_fix_score: f64,
    pub post_fix_outcome: Outcome,
    pub estimated_fix_hours: f64,
    pub evidence: EvidenceSummary,
    pub components: Vec<ComponentResult>,
    pub file_results: Vec<FileResult>,
    pub all_findings: Vec<Finding>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(severity: Severity) -> Finding {
        Finding {
            rule_id: "TST-01".to_string(),
            description: "Test check".to_string(),
            severity,
            location: "Firm-Level".to_string(),
            component: "Testing".to_string(),
            issue: "issue".to_string(),
            remediation: "fix".to_string(),
            estimated_fix_time: "1 hour".to_string(),
        }
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Critical > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
    }

    #[test]
    fn test_severity_serde_strings() {
        assert_eq!(
            serde_json::to_string(&Severity::Critical).unwrap(),
            "\"critical\""
        );
        let parsed: Severity = serde_json::from_str("\"warning\"").unwrap();
        assert_eq!(parsed, Severity::Warning);
    }

    #[test]
    fn test_group_status_worst_severity_wins() {
        assert_eq!(GroupStatus::from_findings(&[]), GroupStatus::Pass);
        assert_eq!(
            GroupStatus::from_findings(&[finding(Severity::Info)]),
            GroupStatus::Pass
        );
        assert_eq!(
            GroupStatus::from_findings(&[finding(Severity::Info), finding(Severity::Warning)]),
            GroupStatus::Warning
        );
        assert_eq!(
            GroupStatus::from_findings(&[
                finding(Severity::Warning),
                finding(Severity::Critical),
                finding(Severity::Info),
            ]),
            GroupStatus::Critical
        );
    }

    #[test]
    fn test_findings_summary_counts() {
        let findings = vec![
            finding(Severity::Critical),
            finding(Severity::Critical),
            finding(Severity::Warning),
            finding(Severity::Info),
        ];
        let summary = FindingsSummary::from_findings(&findings);
        assert_eq!(summary.critical, 2);
        assert_eq!(summary.warning, 1);
        assert_eq!(summary.info, 1);
        assert_eq!(summary.total, 4);
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(
            Outcome::DoesNotMeet.to_string(),
            "Does Not Meet Requirements"
        );
        assert_eq!(
            Outcome::MeetsWithNotes.to_string(),
            "Meets Requirements (with notes)"
        );
        assert_eq!(Outcome::Meets.to_string(), "Meets Requirements");
        assert_eq!(
            serde_json::to_string(&Outcome::MeetsWithNotes).unwrap(),
            "\"Meets Requirements (with notes)\""
        );
    }

    #[test]
    fn test_component_counts() {
        let comp = ComponentResult {
            name: "Governance & Leadership".to_string(),
            description: "test".to_string(),
            findings: vec![finding(Severity::Critical), finding(Severity::Warning)],
        };
        assert_eq!(comp.critical_count(), 1);
        assert_eq!(comp.warning_count(), 1);
        assert_eq!(comp.status(), GroupStatus::Critical);
    }
}
