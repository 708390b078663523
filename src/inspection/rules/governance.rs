//! Governance and leadership rules (GOV-01 to GOV-03)

use crate::inspection::docs::{FirmDocuments, GovernancePolicies};
use crate::inspection::models::{Finding, Severity};
use crate::inspection::rules::{ComponentCheck, FIRM_LEVEL};

pub struct GovernanceCheck;

impl ComponentCheck for GovernanceCheck {
    fn name(&self) -> &'static str {
        "Governance & Leadership"
    }

    fn description(&self) -> &'static str {
        "CSQM 1 Component 1 — Firm governance, leadership, and culture supporting quality"
    }

    fn check(&self, docs: &FirmDocuments) -> Vec<Finding> {
        let gov: GovernancePolicies = docs.view("governance_policies");
        let mut findings = Vec::new();

        if !gov.tone_at_top_policy {
            findings.push(Finding {
                rule_id: "GOV-01".to_string(),
                description: "Tone-at-top policy documented".to_string(),
                severity: Severity::Critical,
                location: FIRM_LEVEL.to_string(),
                component: "Governance".to_string(),
                issue: "No tone-at-top quality policy found.".to_string(),
                remediation: "Document a firm-wide quality commitment policy signed by partners."
                    .to_string(),
                estimated_fix_time: "2 hours".to_string(),
            });
        }

        if gov
            .quality_responsibility_assigned_to
            .as_deref()
            .map_or(true, str::is_empty)
        {
            findings.push(Finding {
                rule_id: "GOV-02".to_string(),
                description: "Quality responsibility assigned to individual".to_string(),
                severity: Severity::Critical,
                location: FIRM_LEVEL.to_string(),
                component: "Governance".to_string(),
                issue: "No individual assigned quality management responsibility.".to_string(),
                remediation: "Assign a partner as the quality management leader and document it."
                    .to_string(),
                estimated_fix_time: "30 minutes".to_string(),
            });
        }

        if !gov.strategic_quality_review_documented {
            findings.push(Finding {
                rule_id: "GOV-03".to_string(),
                description: "Strategic quality review documented".to_string(),
                severity: Severity::Warning,
                location: FIRM_LEVEL.to_string(),
                component: "Governance".to_string(),
                issue: "Strategic quality review not documented.".to_string(),
                remediation: "Document annual strategic review of quality objectives.".to_string(),
                estimated_fix_time: "1 hour".to_string(),
            });
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn docs_with_governance(doc: serde_json::Value) -> FirmDocuments {
        let mut docs = FirmDocuments::default();
        docs.insert("governance_policies".to_string(), doc);
        docs
    }

    #[test]
    fn test_compliant_governance_yields_no_findings() {
        let docs = docs_with_governance(json!({
            "tone_at_top_policy": true,
            "quality_responsibility_assigned_to": "J. Morin, CPA",
            "strategic_quality_review_documented": true
        }));
        assert!(GovernanceCheck.check(&docs).is_empty());
    }

    #[test]
    fn test_missing_tone_and_responsibility_with_review_documented() {
        // GOV-03 must stay silent when the review is documented
        let docs = docs_with_governance(json!({
            "strategic_quality_review_documented": true
        }));
        let findings = GovernanceCheck.check(&docs);
        let ids: Vec<&str> = findings.iter().map(|f| f.rule_id.as_str()).collect();
        assert_eq!(ids, vec!["GOV-01", "GOV-02"]);
        assert!(findings.iter().all(|f| f.severity == Severity::Critical));
    }

    #[test]
    fn test_absent_document_fires_all_three() {
        let docs = FirmDocuments::default();
        let ids: Vec<String> = GovernanceCheck
            .check(&docs)
            .into_iter()
            .map(|f| f.rule_id)
            .collect();
        assert_eq!(ids, vec!["GOV-01", "GOV-02", "GOV-03"]);
    }

    #[test]
    fn test_empty_responsibility_string_fires_gov02() {
        let docs = docs_with_governance(json!({
            "tone_at_top_policy": true,
            "quality_responsibility_assigned_to": "",
            "strategic_quality_review_documented": true
        }));
        let findings = GovernanceCheck.check(&docs);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule_id, "GOV-02");
    }
}
