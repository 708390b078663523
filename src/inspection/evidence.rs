//! Evidence chain summary
//!
//! Maps each firm-level document to the inspection rules it substantiates. A
//! link is "broken" when the scan raised a critical or warning finding for
//! that rule id; the same rule listed under two documents counts as two
//! links.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::inspection::models::{Finding, Severity};

/// Document-to-requirement mapping, in display order.
pub const EVIDENCE_CHAIN: &[(&str, &[&str])] = &[
    ("SoQM Manual", &["GOV-01", "GOV-02", "GOV-03", "RES-02"]),
    ("Independence Declarations", &["ETH-01", "ETH-02"]),
    ("Conflict Register", &["ETH-03"]),
    ("Client Acceptance Forms", &["ACC-01", "ACC-02", "ACC-03"]),
    ("CPD Records", &["RES-01"]),
    ("Policy Distribution Log", &["COM-01", "COM-02"]),
    ("Complaints Procedure", &["COM-03"]),
    ("Monitoring Log", &["MON-01", "MON-02", "MON-03"]),
    ("SoQM Evaluation", &["MON-04"]),
    ("Remediation Log", &["MON-05", "MON-06"]),
    ("Governance Policies", &["GOV-01", "GOV-02", "GOV-03"]),
];

/// Link totals across the document-to-requirement map
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceSummary {
    pub total_links: usize,
    pub connected: usize,
    pub broken: usize,
    /// Rule ids with at least one critical/warning finding, sorted
    pub broken_rules: Vec<String>,
}

/// Summarize evidence-chain health from the scan's findings.
pub fn summarize(findings: &[Finding]) -> EvidenceSummary {
    let broken_rules: BTreeSet<&str> = findings
        .iter()
        .filter(|f| matches!(f.severity, Severity::Critical | Severity::Warning))
        .map(|f| f.rule_id.as_str())
        .collect();

    let total_links: usize = EVIDENCE_CHAIN.iter().map(|(_, rules)| rules.len()).sum();
    let broken = EVIDENCE_CHAIN
        .iter()
        .flat_map(|(_, rules)| rules.iter())
        .filter(|r| broken_rules.contains(*r))
        .count();

    EvidenceSummary {
        total_links,
        connected: total_links - broken,
        broken,
        broken_rules: broken_rules.into_iter().map(str::to_string).collect(),
    }
}
