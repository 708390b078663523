//! Ethics and independence rules (ETH-01 to ETH-03)

use crate::inspection::docs::{ConflictRegister, FirmDocuments, IndependenceDeclarations};
use crate::inspection::models::{Finding, Severity};
use crate::inspection::rules::{ComponentCheck, FIRM_LEVEL};

pub struct EthicsCheck;

impl ComponentCheck for EthicsCheck {
    fn name(&self) -> &'static str {
        "Ethics & Independence"
    }

    fn description(&self) -> &'static str {
        "CSQM 1 Component 2 — Ethical requirements including independence"
    }

    fn check(&self, docs: &FirmDocuments) -> Vec<Finding> {
        let indep: IndependenceDeclarations = docs.view("independence_declarations");
        let mut findings = Vec::new();

        // ETH-01: one grouped finding naming every unsigned declaration
        let unsigned: Vec<&str> = indep
            .declarations
            .iter()
            .filter(|d| !d.signed)
            .map(|d| d.person.as_str())
            .collect();
        if !unsigned.is_empty() {
            findings.push(Finding {
                rule_id: "ETH-01".to_string(),
                description: "All personnel have signed independence declaration".to_string(),
                severity: Severity::Critical,
                location: FIRM_LEVEL.to_string(),
                component: "Ethics & Independence".to_string(),
                issue: format!(
                    "Missing independence declaration for: {}.",
                    unsigned.join(", ")
                ),
                remediation: "Obtain signed independence declarations from all personnel immediately."
                    .to_string(),
                estimated_fix_time: "1 hour".to_string(),
            });
        }

        // ETH-02: one finding per late declaration
        for d in indep
            .declarations
            .iter()
            .filter(|d| d.status.as_deref() == Some("late"))
        {
            findings.push(Finding {
                rule_id: "ETH-02".to_string(),
                description: "Independence declarations dated before engagement work".to_string(),
                severity: Severity::Critical,
                location: FIRM_LEVEL.to_string(),
                component: "Ethics & Independence".to_string(),
                issue: d
                    .issue
                    .clone()
                    .unwrap_or_else(|| format!("{}'s declaration was signed late.", d.person)),
                remediation: "Ensure all declarations are signed at the start of the coverage period, before any engagement work begins."
                    .to_string(),
                estimated_fix_time: "30 minutes".to_string(),
            });
        }

        let conflict: ConflictRegister = docs.view("conflict_register");
        if !conflict.exists {
            findings.push(Finding {
                rule_id: "ETH-03".to_string(),
                description: "Conflict of interest register maintained".to_string(),
                severity: Severity::Warning,
                location: FIRM_LEVEL.to_string(),
                component: "Ethics & Independence".to_string(),
                issue: "No conflict of interest register found.".to_string(),
                remediation: "Create and maintain a conflict of interest register.".to_string(),
                estimated_fix_time: "1 hour".to_string(),
            });
        }

        findings
    }
}
