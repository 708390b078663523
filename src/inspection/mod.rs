//! Practice-inspection pipeline
//!
//! Runs the firm-level component checks and per-file engagement checks over a
//! loaded document set, counts granular assertions, and projects a readiness
//! score with a post-fix comparison. The scan is a pure function of the
//! loaded documents plus an explicit `as_of` date; wall-clock time never
//! enters the computation.

pub mod docs;
pub mod effort;
pub mod evidence;
pub mod models;
pub mod rules;

use chrono::NaiveDate;
use serde_json::Value;
use tracing::{debug, info};

use crate::doctree::{count_assertions, AssertionCounts};
use crate::loader::PracticeData;
use docs::EngagementFile;
use models::{
    ComponentResult, FileResult, Finding, FindingsSummary, Outcome, ScanResult,
};

/// Score penalty per critical finding
const CRITICAL_PENALTY: f64 = 0.012;
/// Score penalty per warning finding
const WARNING_PENALTY: f64 = 0.002;
/// More warnings than this downgrades the outcome to "with notes"
const NOTES_WARNING_THRESHOLD: usize = 3;

/// Execute the full practice inspection readiness scan.
pub fn run_scan(data: &PracticeData, as_of: NaiveDate) -> ScanResult {
    debug!("Running firm-level component checks");
    let components: Vec<ComponentResult> = rules::component_checks()
        .iter()
        .map(|check| ComponentResult {
            name: check.name().to_string(),
            description: check.description().to_string(),
            findings: check.check(&data.documents),
        })
        .collect();

    debug!(
        "Checking {} engagement files",
        data.engagement_files.len()
    );
    let file_results: Vec<FileResult> = data
        .engagement_files
        .iter()
        .map(|raw| {
            let file: EngagementFile =
                serde_json::from_value(raw.clone()).unwrap_or_default();
            let findings = rules::check_engagement_file(&file);
            FileResult {
                file_id: file.file_id,
                client_name: file.client_name.unwrap_or_default(),
                engagement_type: file.engagement_type.unwrap_or_default(),
                standard: file.standard,
                engagement_partner: file.engagement_partner,
                prepared_by: file.prepared_by,
                assertions_passed: file.assertions_passed,
                assertions_total: file.assertions_total,
                overall_status: file.overall_status,
                findings,
            }
        })
        .collect();

    let mut all_findings: Vec<Finding> = Vec::new();
    for c in &components {
        all_findings.extend(c.findings.iter().cloned());
    }
    for fr in &file_results {
        all_findings.extend(fr.findings.iter().cloned());
    }

    let summary = FindingsSummary::from_findings(&all_findings);

    // Each boolean check field in the source documents is one assertion;
    // engagement files contribute only their checks subtree.
    let mut assertions = AssertionCounts::default();
    for doc in data.documents.values() {
        assertions.merge(count_assertions(doc));
    }
    for ef in &data.engagement_files {
        let checks = ef.get("checks").unwrap_or(&Value::Null);
        assertions.merge(count_assertions(checks));
    }

    let base = assertions.ratio();
    let penalty =
        summary.critical as f64 * CRITICAL_PENALTY + summary.warning as f64 * WARNING_PENALTY;
    let readiness_score = round1((base - penalty).max(0.0) * 100.0);
    let predicted_outcome = classify(summary.critical, summary.warning);

    // Post-fix projection: same assertion base, critical items assumed fixed
    let post_fix_penalty = summary.warning as f64 * WARNING_PENALTY;
    let post_fix_score = round1((base - post_fix_penalty).max(0.0) * 100.0);
    let post_fix_outcome = classify_post_fix(summary.warning);

    let estimated_fix_hours = effort::total_fix_hours(&all_findings);
    let evidence = evidence::summarize(&all_findings);
    let days_until_inspection = days_until(&data.firm_profile.next_inspection_due, as_of);

    info!(
        "Scan complete: score {:.1}, {} critical, {} warnings, {} info across {} files",
        readiness_score,
        summary.critical,
        summary.warning,
        summary.info,
        file_results.len()
    );

    ScanResult {
        firm_name: data.firm_profile.firm_name.clone(),
        license_number: data.firm_profile.license_number.clone(),
        jurisdiction: data.firm_profile.jurisdiction.clone(),
        next_inspection_due: data.firm_profile.next_inspection_due.clone(),
        report_date: as_of.format("%Y-%m-%d").to_string(),
        days_until_inspection,
        readiness_score,
        predicted_outcome,
        total_assertions: assertions.total,
        passed_assertions: assertions.passed,
        critical_count: summary.critical,
        warning_count: summary.warning,
        info_count: summary.info,
        files_scanned: file_results.len(),
        post_fix_score,
        post_fix_outcome,
        estimated_fix_hours,
        evidence,
        components,
        file_results,
        all_findings,
    }
}

fn classify(critical: usize, warning: usize) -> Outcome {
    if critical > 0 {
        Outcome::DoesNotMeet
    } else if warning > NOTES_WARNING_THRESHOLD {
        Outcome::MeetsWithNotes
    } else {
        Outcome::Meets
    }
}

fn classify_post_fix(warning: usize) -> Outcome {
    if warning > NOTES_WARNING_THRESHOLD {
        Outcome::MeetsWithNotes
    } else {
        Outcome::Meets
    }
}

fn days_until(due: &str, as_of: NaiveDate) -> Option<i64> {
    NaiveDate::parse_from_str(due, "%Y-%m-%d")
        .ok()
        .map(|date| (date - as_of).num_days())
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspection::docs::{FirmDocuments, FirmProfile};
    use serde_json::json;

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn compliant_firm_documents() -> FirmDocuments {
        let mut docs = FirmDocuments::default();
        docs.insert(
            "governance_policies".to_string(),
            json!({
                "document_type": "governance_policies",
                "tone_at_top_policy": true,
                "quality_responsibility_assigned_to": "J. Morin, CPA",
                "strategic_quality_review_documented": true
            }),
        );
        docs.insert(
            "independence_declarations".to_string(),
            json!({
                "declarations": [
                    {"person": "A. Chen", "signed": true, "status": "current"}
                ]
            }),
        );
        docs.insert("conflict_register".to_string(), json!({"exists": true}));
        docs.insert(
            "client_acceptance_forms".to_string(),
            json!({"forms": [
                {"client": "Maple Retail Inc.", "form_exists": true,
                 "risk_assessment": true, "integrity_eval": true}
            ]}),
        );
        docs.insert(
            "cpd_records".to_string(),
            json!({"records": [{"person": "A. Chen", "status": "ok"}]}),
        );
        docs.insert(
            "soqm_manual".to_string(),
            json!({"approved_by_leadership": true, "covers_all_components": true}),
        );
        docs.insert(
            "policy_distribution_log".to_string(),
            json!({"distributions": [{"missing_acknowledgment": []}]}),
        );
        docs.insert(
            "complaints_procedure".to_string(),
            json!({"procedure_exists": true}),
        );
        docs.insert(
            "monitoring_log".to_string(),
            json!({
                "annual_file_monitoring": {"performed": true},
                "completed_engagement_monitoring": {"performed": true, "reviewer_independent": true}
            }),
        );
        docs.insert("soqm_evaluation".to_string(), json!({"overdue": false}));
        docs.insert("remediation_log".to_string(), json!({"entries": []}));
        docs
    }

    fn practice_data(documents: FirmDocuments, engagement_files: Vec<Value>) -> PracticeData {
        PracticeData {
            firm_profile: FirmProfile {
                firm_name: "Morin & Associates CPA".to_string(),
                license_number: "ON-44721".to_string(),
                jurisdiction: "Ontario".to_string(),
                next_inspection_due: "2024-09-15".to_string(),
            },
            documents,
            engagement_files,
        }
    }

    #[test]
    fn test_compliant_firm_meets_requirements() {
        let data = practice_data(compliant_firm_documents(), vec![]);
        let result = run_scan(&data, test_date());
        assert_eq!(result.critical_count, 0);
        assert_eq!(result.warning_count, 0);
        assert_eq!(result.predicted_outcome, Outcome::Meets);
        assert!(result.passed_assertions <= result.total_assertions);
        assert!(result.readiness_score > 90.0);
    }

    #[test]
    fn test_empty_documents_score_zero_without_panicking() {
        let data = practice_data(FirmDocuments::default(), vec![]);
        let result = run_scan(&data, test_date());
        assert_eq!(result.total_assertions, 0);
        assert_eq!(result.readiness_score, 0.0);
        assert_eq!(result.predicted_outcome, Outcome::DoesNotMeet);
    }

    #[test]
    fn test_component_registration_order() {
        let data = practice_data(compliant_firm_documents(), vec![]);
        let result = run_scan(&data, test_date());
        let names: Vec<&str> = result.components.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Governance & Leadership",
                "Ethics & Independence",
                "Client Acceptance & Continuance",
                "Resources",
                "Information & Communication",
                "Monitoring & Remediation",
            ]
        );
    }

    #[test]
    fn test_firm_findings_precede_file_findings() {
        let mut documents = compliant_firm_documents();
        documents.insert("conflict_register".to_string(), json!({"exists": false}));
        let engagement = json!({
            "file_id": "EF-2024-001",
            "client_name": "Maple Retail Inc.",
            "engagement_type": "compilation",
            "checks": {
                "engagement_letter": {
                    "exists": false,
                    "signed_by_client": false, "signed_by_firm": false,
                    "references_csrs_4200": true
                },
                "independence": {"assessment_documented": true},
                "financial_statements": {"basis_of_accounting_note": true},
                "file_assembly": {"status": "ok"}
            }
        });
        let data = practice_data(documents, vec![engagement]);
        let result = run_scan(&data, test_date());
        let ids: Vec<&str> = result
            .all_findings
            .iter()
            .map(|f| f.rule_id.as_str())
            .collect();
        assert_eq!(ids, vec!["ETH-03", "ENG-01"]);
    }

    #[test]
    fn test_penalties_reduce_score() {
        // 10 assertions, 8 passed, 1 critical + 2 warnings seeded directly
        // through documents is awkward; instead verify the arithmetic on a
        // small fabricated document set.
        let mut documents = FirmDocuments::default();
        documents.insert(
            "governance_policies".to_string(),
            json!({
                "tone_at_top_policy": true,
                "quality_responsibility_assigned_to": "J. Morin, CPA",
                "strategic_quality_review_documented": true,
                "extra_checks": {"a": true, "b": true, "c": false}
            }),
        );
        let data = practice_data(documents, vec![]);
        let result = run_scan(&data, test_date());

        // Missing docs fire many rules but assertions only come from the one
        // document: 5 booleans, 4 passed.
        assert_eq!(result.total_assertions, 5);
        assert_eq!(result.passed_assertions, 4);
        let base = 4.0 / 5.0;
        let penalty = result.critical_count as f64 * 0.012 + result.warning_count as f64 * 0.002;
        let expected = ((base - penalty).max(0.0) * 100.0 * 10.0).round() / 10.0;
        assert_eq!(result.readiness_score, expected);
    }

    #[test]
    fn test_post_fix_score_at_least_as_filed() {
        let data = practice_data(FirmDocuments::default(), vec![]);
        let result = run_scan(&data, test_date());
        assert!(result.critical_count > 0);
        assert!(result.post_fix_score >= result.readiness_score);
        assert_ne!(result.post_fix_outcome, Outcome::DoesNotMeet);
    }

    #[test]
    fn test_outcome_warning_threshold_boundary() {
        assert_eq!(classify(0, 3), Outcome::Meets);
        assert_eq!(classify(0, 4), Outcome::MeetsWithNotes);
        assert_eq!(classify(1, 0), Outcome::DoesNotMeet);
        assert_eq!(classify_post_fix(3), Outcome::Meets);
        assert_eq!(classify_post_fix(4), Outcome::MeetsWithNotes);
    }

    #[test]
    fn test_days_until_inspection() {
        let data = practice_data(compliant_firm_documents(), vec![]);
        let result = run_scan(&data, test_date());
        // 2024-06-01 to 2024-09-15
        assert_eq!(result.days_until_inspection, Some(106));
    }

    #[test]
    fn test_unparseable_due_date_yields_none() {
        let mut data = practice_data(compliant_firm_documents(), vec![]);
        data.firm_profile.next_inspection_due = "Q3 2024".to_string();
        let result = run_scan(&data, test_date());
        assert_eq!(result.days_until_inspection, None);
    }

    #[test]
    fn test_scan_is_idempotent() {
        let data = practice_data(compliant_firm_documents(), vec![]);
        let first = run_scan(&data, test_date());
        let second = run_scan(&data, test_date());
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
