//! Resource rules (RES-01, RES-02)

use crate::inspection::docs::{CpdRecords, FirmDocuments};
use crate::inspection::models::{Finding, Severity};
use crate::inspection::rules::{ComponentCheck, FIRM_LEVEL};

pub struct ResourcesCheck;

impl ComponentCheck for ResourcesCheck {
    fn name(&self) -> &'static str {
        "Resources"
    }

    fn description(&self) -> &'static str {
        "CSQM 1 Component 4 — Human resources, intellectual resources, and CPD"
    }

    fn check(&self, docs: &FirmDocuments) -> Vec<Finding> {
        let cpd: CpdRecords = docs.view("cpd_records");
        let mut findings = Vec::new();

        let non_compliant: Vec<String> = cpd
            .records
            .iter()
            .filter(|r| matches!(r.status.as_deref(), Some("warning") | Some("missing")))
            .map(|r| match r.issue.as_deref().filter(|s| !s.is_empty()) {
                Some(issue) => format!("{} — {}", r.person, issue),
                None => r.person.clone(),
            })
            .collect();
        if !non_compliant.is_empty() {
            findings.push(Finding {
                rule_id: "RES-01".to_string(),
                description: "All staff CPD records current".to_string(),
                severity: Severity::Warning,
                location: FIRM_LEVEL.to_string(),
                component: "Resources".to_string(),
                issue: format!("CPD requirements not met for: {}", non_compliant.join("; ")),
                remediation:
                    "Ensure all personnel complete required CPD hours. Establish CPD plan for new hires."
                        .to_string(),
                estimated_fix_time: "Varies (4-20 hours per person)".to_string(),
            });
        }

        if !docs.has_content("soqm_manual") {
            findings.push(Finding {
                rule_id: "RES-02".to_string(),
                description: "SoQM manual exists".to_string(),
                severity: Severity::Critical,
                location: FIRM_LEVEL.to_string(),
                component: "Resources".to_string(),
                issue: "No System of Quality Management manual found.".to_string(),
                remediation: "Obtain or create a CSQM 1 compliant SoQM manual.".to_string(),
                estimated_fix_time: "20+ hours".to_string(),
            });
        }

        findings
    }
}
