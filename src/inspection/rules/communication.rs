//! Information and communication rules (COM-01 to COM-03)

use crate::inspection::docs::{ComplaintsProcedure, FirmDocuments, PolicyDistributionLog};
use crate::inspection::models::{Finding, Severity};
use crate::inspection::rules::{ComponentCheck, FIRM_LEVEL};

pub struct CommunicationCheck;

impl ComponentCheck for CommunicationCheck {
    fn name(&self) -> &'static str {
        "Information & Communication"
    }

    fn description(&self) -> &'static str {
        "CSQM 1 Component 5 — Information systems, policy communication, and complaints"
    }

    fn check(&self, docs: &FirmDocuments) -> Vec<Finding> {
        let log: PolicyDistributionLog = docs.view("policy_distribution_log");
        let mut findings = Vec::new();

        if log.distributions.is_empty() {
            findings.push(Finding {
                rule_id: "COM-01".to_string(),
                description: "Policy distribution log maintained".to_string(),
                severity: Severity::Warning,
                location: FIRM_LEVEL.to_string(),
                component: "Communication".to_string(),
                issue: "No policy distribution log found.".to_string(),
                remediation: "Create a log tracking policy distribution and staff acknowledgment."
                    .to_string(),
                estimated_fix_time: "1 hour".to_string(),
            });
        } else {
            for dist in log
                .distributions
                .iter()
                .filter(|d| !d.missing_acknowledgment.is_empty())
            {
                findings.push(Finding {
                    rule_id: "COM-02".to_string(),
                    description: "All staff acknowledged receiving policies".to_string(),
                    severity: Severity::Warning,
                    location: FIRM_LEVEL.to_string(),
                    component: "Communication".to_string(),
                    issue: dist.issue.clone().unwrap_or_else(|| {
                        format!(
                            "Missing acknowledgment from: {}",
                            dist.missing_acknowledgment.join(", ")
                        )
                    }),
                    remediation:
                        "Distribute policies to new hires and obtain written acknowledgment."
                            .to_string(),
                    estimated_fix_time: "30 minutes".to_string(),
                });
            }
        }

        let complaints: ComplaintsProcedure = docs.view("complaints_procedure");
        if !complaints.procedure_exists {
            findings.push(Finding {
                rule_id: "COM-03".to_string(),
                description: "Complaints procedure documented".to_string(),
                severity: Severity::Warning,
                location: FIRM_LEVEL.to_string(),
                component: "Communication".to_string(),
                issue: "No complaints handling procedure documented.".to_string(),
                remediation: "Document a complaints procedure in the SoQM manual.".to_string(),
                estimated_fix_time: "1 hour".to_string(),
            });
        }

        findings
    }
}
