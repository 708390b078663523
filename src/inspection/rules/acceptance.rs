//! Client acceptance rules (ACC-01 to ACC-03)

use crate::inspection::docs::{ClientAcceptanceForms, FirmDocuments};
use crate::inspection::models::{Finding, Severity};
use crate::inspection::rules::{ComponentCheck, FIRM_LEVEL};

pub struct AcceptanceCheck;

impl ComponentCheck for AcceptanceCheck {
    fn name(&self) -> &'static str {
        "Client Acceptance & Continuance"
    }

    fn description(&self) -> &'static str {
        "CSQM 1 Component 3 — Accepting and continuing client relationships"
    }

    fn check(&self, docs: &FirmDocuments) -> Vec<Finding> {
        let acceptance: ClientAcceptanceForms = docs.view("client_acceptance_forms");
        let forms = &acceptance.forms;
        let mut findings = Vec::new();

        let missing_forms: Vec<&str> = forms
            .iter()
            .filter(|f| !f.form_exists)
            .map(|f| f.client.as_str())
            .collect();
        if !missing_forms.is_empty() {
            findings.push(Finding {
                rule_id: "ACC-01".to_string(),
                description: "Client acceptance form exists for all inspected clients".to_string(),
                severity: Severity::Critical,
                location: FIRM_LEVEL.to_string(),
                component: "Client Acceptance".to_string(),
                issue: format!(
                    "Missing client acceptance forms for: {}.",
                    missing_forms.join(", ")
                ),
                remediation: "Complete client acceptance forms for all clients.".to_string(),
                estimated_fix_time: "2 hours".to_string(),
            });
        }

        let missing_risk: Vec<&str> = forms
            .iter()
            .filter(|f| !f.risk_assessment)
            .map(|f| f.client.as_str())
            .collect();
        if !missing_risk.is_empty() {
            findings.push(Finding {
                rule_id: "ACC-02".to_string(),
                description: "Risk assessment completed per client".to_string(),
                severity: Severity::Critical,
                location: FIRM_LEVEL.to_string(),
                component: "Client Acceptance".to_string(),
                issue: format!("Missing risk assessment for: {}.", missing_risk.join(", ")),
                remediation: "Complete risk assessment for all clients.".to_string(),
                estimated_fix_time: "1 hour per client".to_string(),
            });
        }

        let missing_integrity: Vec<_> = forms.iter().filter(|f| !f.integrity_eval).collect();
        if !missing_integrity.is_empty() {
            let names: Vec<&str> = missing_integrity.iter().map(|f| f.client.as_str()).collect();
            let issues: Vec<&str> = missing_integrity
                .iter()
                .filter_map(|f| f.issue.as_deref())
                .filter(|s| !s.is_empty())
                .collect();
            let mut issue_text = format!(
                "Missing client integrity evaluation for: {}.",
                names.join(", ")
            );
            if !issues.is_empty() {
                issue_text.push(' ');
                issue_text.push_str(&issues.join(" "));
            }
            findings.push(Finding {
                rule_id: "ACC-03".to_string(),
                description: "Client integrity evaluation documented".to_string(),
                severity: Severity::Warning,
                location: FIRM_LEVEL.to_string(),
                component: "Client Acceptance".to_string(),
                issue: issue_text,
                remediation:
                    "Document integrity evaluation for all clients, especially cash-heavy businesses."
                        .to_string(),
                estimated_fix_time: "1 hour".to_string(),
            });
        }

        findings
    }
}
