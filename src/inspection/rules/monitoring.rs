//! Monitoring and remediation rules (MON-01 to MON-06)

use crate::inspection::docs::{FirmDocuments, MonitoringLog, RemediationLog, SoqmEvaluation};
use crate::inspection::models::{Finding, Severity};
use crate::inspection::rules::{ComponentCheck, FIRM_LEVEL};

pub struct MonitoringCheck;

impl ComponentCheck for MonitoringCheck {
    fn name(&self) -> &'static str {
        "Monitoring & Remediation"
    }

    fn description(&self) -> &'static str {
        "CSQM 1 Component 7 — Monitoring activities and remediation of deficiencies"
    }

    fn check(&self, docs: &FirmDocuments) -> Vec<Finding> {
        let log: MonitoringLog = docs.view("monitoring_log");
        let mut findings = Vec::new();

        if !log.annual_file_monitoring.performed {
            findings.push(Finding {
                rule_id: "MON-01".to_string(),
                description: "Annual file monitoring performed".to_string(),
                severity: Severity::Critical,
                location: FIRM_LEVEL.to_string(),
                component: "Monitoring".to_string(),
                issue: "Annual file monitoring has not been performed.".to_string(),
                remediation: "Perform annual file monitoring review and document results."
                    .to_string(),
                estimated_fix_time: "4 hours".to_string(),
            });
        }

        let cem = &log.completed_engagement_monitoring;
        if !cem.performed {
            findings.push(Finding {
                rule_id: "MON-02".to_string(),
                description: "Completed engagement monitoring performed".to_string(),
                severity: Severity::Critical,
                location: FIRM_LEVEL.to_string(),
                component: "Monitoring".to_string(),
                issue: "Completed engagement monitoring has not been performed.".to_string(),
                remediation: "Perform completed engagement monitoring review.".to_string(),
                estimated_fix_time: "4 hours".to_string(),
            });
        }

        // MON-03 only applies once the review actually happened
        if cem.performed && !cem.reviewer_independent {
            findings.push(Finding {
                rule_id: "MON-03".to_string(),
                description: "Monitoring reviewer independent of files reviewed".to_string(),
                severity: Severity::Critical,
                location: FIRM_LEVEL.to_string(),
                component: "Monitoring".to_string(),
                issue: cem.issue.clone().unwrap_or_else(|| {
                    "Monitoring reviewer was not independent of the files reviewed.".to_string()
                }),
                remediation:
                    "Engage an external reviewer or assign someone who did not work on any of the reviewed files."
                        .to_string(),
                estimated_fix_time: "2 hours (plus re-review cost)".to_string(),
            });
        }

        let soqm_eval: SoqmEvaluation = docs.view("soqm_evaluation");
        if soqm_eval.overdue {
            findings.push(Finding {
                rule_id: "MON-04".to_string(),
                description: "Annual SoQM evaluation performed".to_string(),
                severity: Severity::Critical,
                location: FIRM_LEVEL.to_string(),
                component: "Monitoring".to_string(),
                issue: soqm_eval
                    .issue
                    .clone()
                    .unwrap_or_else(|| "Annual SoQM evaluation is overdue.".to_string()),
                remediation:
                    "Complete the annual SoQM evaluation immediately. Consider all monitoring results, external inspections, and complaints."
                        .to_string(),
                estimated_fix_time: "3 hours".to_string(),
            });
        }

        let remediation_log: RemediationLog = docs.view("remediation_log");
        let open_entries: Vec<_> = remediation_log
            .entries
            .iter()
            .filter(|e| e.status.as_deref() == Some("open"))
            .collect();

        for e in open_entries
            .iter()
            .filter(|e| e.corrective_action.as_deref().map_or(true, str::is_empty))
        {
            findings.push(Finding {
                rule_id: "MON-05".to_string(),
                description: "All remediation entries have corrective actions".to_string(),
                severity: Severity::Critical,
                location: FIRM_LEVEL.to_string(),
                component: "Monitoring".to_string(),
                issue: e.issue.clone().unwrap_or_else(|| {
                    format!(
                        "Open deficiency without corrective action: {}",
                        e.deficiency.as_deref().unwrap_or("")
                    )
                }),
                remediation:
                    "Document corrective action for each identified deficiency. The inspector will flag open items with no response."
                        .to_string(),
                estimated_fix_time: "1 hour".to_string(),
            });
        }

        if open_entries
            .iter()
            .any(|e| e.root_cause.as_deref().map_or(true, str::is_empty))
        {
            findings.push(Finding {
                rule_id: "MON-06".to_string(),
                description: "Root cause analysis documented for all deficiencies".to_string(),
                severity: Severity::Warning,
                location: FIRM_LEVEL.to_string(),
                component: "Monitoring".to_string(),
                issue: "Open deficiencies without root cause analysis documented.".to_string(),
                remediation: "Perform and document root cause analysis for all open deficiencies."
                    .to_string(),
                estimated_fix_time: "1 hour".to_string(),
            });
        }

        findings
    }
}
