//! Engagement file rules (ENG-01 to ENG-07, REV-01, REV-02)
//!
//! One pass per file. Several rules apply only to compilation engagements;
//! review engagements get the two REV rules instead.

use crate::inspection::docs::EngagementFile;
use crate::inspection::models::{Finding, Severity};

pub fn check_engagement_file(file: &EngagementFile) -> Vec<Finding> {
    let location = file.location();
    let checks = &file.checks;
    let eng_type = file.rule_engagement_type();
    let mut findings = Vec::new();

    let el = &checks.engagement_letter;
    if !(el.exists && el.signed_by_client && el.signed_by_firm) {
        findings.push(Finding {
            rule_id: "ENG-01".to_string(),
            description: "Engagement letter exists and signed by both parties".to_string(),
            severity: Severity::Critical,
            location: location.clone(),
            component: "Engagement Letter".to_string(),
            issue: "Engagement letter is missing or not signed by both parties.".to_string(),
            remediation:
                "Obtain a properly executed engagement letter signed by both client and firm."
                    .to_string(),
            estimated_fix_time: "1 hour".to_string(),
        });
    }

    // ENG-02: ISO date strings compare lexicographically
    if let (Some(date_signed), Some(work_start)) = (
        el.date_signed.as_deref().filter(|s| !s.is_empty()),
        el.work_start_date.as_deref().filter(|s| !s.is_empty()),
    ) {
        if date_signed > work_start {
            findings.push(Finding {
                rule_id: "ENG-02".to_string(),
                description: "Engagement letter dated before or at start of work".to_string(),
                severity: Severity::Critical,
                location: location.clone(),
                component: "Engagement Letter".to_string(),
                issue: format!(
                    "Engagement letter dated {date_signed} but work started {work_start} — letter signed after work began."
                ),
                remediation:
                    "Ensure engagement letters are always signed BEFORE beginning any work. This cannot be retroactively fixed for this file — document the gap and implement controls to prevent recurrence."
                        .to_string(),
                estimated_fix_time: "30 minutes (documentation)".to_string(),
            });
        }
    }

    if eng_type == "compilation" && !el.references_csrs_4200 {
        findings.push(Finding {
            rule_id: "ENG-03".to_string(),
            description: "Engagement letter references applicable standard".to_string(),
            severity: Severity::Critical,
            location: location.clone(),
            component: "Engagement Letter".to_string(),
            issue: "Engagement letter does not reference CSRS 4200.".to_string(),
            remediation:
                "Update engagement letter template to reference CSRS 4200. Issue an updated letter for next engagement."
                    .to_string(),
            estimated_fix_time: "30 minutes".to_string(),
        });
    }

    let indep = &checks.independence;
    if !indep.assessment_documented {
        findings.push(Finding {
            rule_id: "ENG-04".to_string(),
            description: "Independence assessment documented".to_string(),
            severity: Severity::Critical,
            location: location.clone(),
            component: "Independence".to_string(),
            issue: "No independence assessment documented for this engagement.".to_string(),
            remediation: "Document independence assessment including threat evaluation."
                .to_string(),
            estimated_fix_time: "30 minutes".to_string(),
        });
    }
    if indep.status.as_deref() == Some("warning") {
        if let Some(issue) = indep.issue.as_deref().filter(|s| !s.is_empty()) {
            findings.push(Finding {
                rule_id: "ETH-02".to_string(),
                description: "Independence declaration timing".to_string(),
                severity: Severity::Warning,
                location: location.clone(),
                component: "Independence".to_string(),
                issue: issue.to_string(),
                remediation:
                    "Ensure independence declarations are signed before engagement work begins."
                        .to_string(),
                estimated_fix_time: "30 minutes".to_string(),
            });
        }
    }

    let fs = &checks.financial_statements;
    if !fs.basis_of_accounting_note {
        findings.push(Finding {
            rule_id: "ENG-05".to_string(),
            description: "Financial statements include basis of accounting note".to_string(),
            severity: Severity::Critical,
            location: location.clone(),
            component: "Financial Statements".to_string(),
            issue: fs.issue.clone().unwrap_or_else(|| {
                "Missing basis of accounting note in financial statements.".to_string()
            }),
            remediation:
                "Add a note describing the applicable financial reporting framework (e.g., ASPE). This is a CSRS 4200 requirement."
                    .to_string(),
            estimated_fix_time: "1 hour".to_string(),
        });
    }
    if fs.status.as_deref() == Some("warning") {
        if let Some(issue) = fs.issue.as_deref().filter(|s| !s.is_empty()) {
            findings.push(Finding {
                rule_id: "ENG-05b".to_string(),
                description: "Financial statement comparatives agree".to_string(),
                severity: Severity::Warning,
                location: location.clone(),
                component: "Financial Statements".to_string(),
                issue: issue.to_string(),
                remediation:
                    "Investigate and document the comparative figure discrepancy. Correct the financial statements if needed."
                        .to_string(),
                estimated_fix_time: "1 hour".to_string(),
            });
        }
    }

    // ENG-06 fires only on an explicit false; an absent field stays silent
    if eng_type == "compilation" && checks.report.not_old_section_9200 == Some(false) {
        findings.push(Finding {
            rule_id: "ENG-06".to_string(),
            description: "Report uses current CSRS 4200 wording (not old Section 9200)".to_string(),
            severity: Severity::Critical,
            location: location.clone(),
            component: "Report".to_string(),
            issue: checks.report.issue.clone().unwrap_or_else(|| {
                "Report still uses old Section 9200 'Notice to Reader' wording.".to_string()
            }),
            remediation:
                "Reissue the report using the current CSRS 4200 compilation report format. Update all report templates."
                    .to_string(),
            estimated_fix_time: "1 hour".to_string(),
        });
    }

    let assembly = &checks.file_assembly;
    match assembly.status.as_deref() {
        Some("ok") => {}
        Some("pending") => {
            findings.push(Finding {
                rule_id: "ENG-07".to_string(),
                description: "File assembled within 60 days of report date".to_string(),
                severity: Severity::Info,
                location: location.clone(),
                component: "File Assembly".to_string(),
                issue: assembly
                    .issue
                    .clone()
                    .unwrap_or_else(|| "File assembly not yet completed.".to_string()),
                remediation: "Complete file assembly before the 60-day deadline.".to_string(),
                estimated_fix_time: "1 hour".to_string(),
            });
        }
        _ => {
            if assembly.assembled_within_60_days == Some(false) {
                if let Some(days) = assembly.days_elapsed.filter(|d| *d != 0) {
                    findings.push(Finding {
                        rule_id: "ENG-07".to_string(),
                        description: "File assembled within 60 days of report date".to_string(),
                        severity: Severity::Warning,
                        location: location.clone(),
                        component: "File Assembly".to_string(),
                        issue: format!(
                            "File assembled {days} days after report date (exceeds 60-day limit)."
                        ),
                        remediation:
                            "Implement a tracking system to ensure files are assembled within 60 days."
                                .to_string(),
                        estimated_fix_time: "30 minutes".to_string(),
                    });
                }
            }
        }
    }

    let comp = &checks.compilation_procedures;
    if comp.status.as_deref() == Some("warning") {
        if let Some(issue) = comp.issue.as_deref().filter(|s| !s.is_empty()) {
            findings.push(Finding {
                rule_id: "ENG-05c".to_string(),
                description: "Consideration of misleading statements".to_string(),
                severity: Severity::Warning,
                location: location.clone(),
                component: "Compilation Procedures".to_string(),
                issue: issue.to_string(),
                remediation:
                    "Document consideration of whether the compiled financial statements might be misleading."
                        .to_string(),
                estimated_fix_time: "30 minutes".to_string(),
            });
        }
    }

    if eng_type == "review" {
        if !checks.analytical_procedures.performed {
            findings.push(Finding {
                rule_id: "REV-01".to_string(),
                description: "Analytical procedures performed and documented".to_string(),
                severity: Severity::Critical,
                location: location.clone(),
                component: "Analytical Procedures".to_string(),
                issue: "Analytical procedures not performed for review engagement.".to_string(),
                remediation:
                    "Perform and document analytical procedures as required by CSRE 2400."
                        .to_string(),
                estimated_fix_time: "3 hours".to_string(),
            });
        }
        if !checks.management_representation_letter.obtained {
            findings.push(Finding {
                rule_id: "REV-02".to_string(),
                description: "Management representation letter obtained".to_string(),
                severity: Severity::Critical,
                location: location.clone(),
                component: "Management Representation".to_string(),
                issue: "Management representation letter not obtained.".to_string(),
                remediation: "Obtain a signed management representation letter.".to_string(),
                estimated_fix_time: "1 hour".to_string(),
            });
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn file_from(value: serde_json::Value) -> EngagementFile {
        serde_json::from_value(value).unwrap()
    }

    fn clean_compilation() -> serde_json::Value {
        json!({
            "file_id": "EF-2024-001",
            "client_name": "Maple Retail Inc.",
            "engagement_type": "compilation",
            "checks": {
                "engagement_letter": {
                    "exists": true,
                    "signed_by_client": true,
                    "signed_by_firm": true,
                    "date_signed": "2024-01-05",
                    "work_start_date": "2024-01-20",
                    "references_csrs_4200": true
                },
                "independence": {"assessment_documented": true, "status": "ok"},
                "financial_statements": {"basis_of_accounting_note": true, "status": "ok"},
                "report": {"not_old_section_9200": true},
                "file_assembly": {"status": "ok"},
                "compilation_procedures": {"status": "ok"}
            }
        })
    }

    #[test]
    fn test_clean_compilation_file_passes() {
        let findings = check_engagement_file(&file_from(clean_compilation()));
        assert!(findings.is_empty(), "unexpected: {findings:?}");
    }

    #[test]
    fn test_unsigned_letter_fires_eng01() {
        let mut file = clean_compilation();
        file["checks"]["engagement_letter"]["signed_by_client"] = json!(false);
        let findings = check_engagement_file(&file_from(file));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule_id, "ENG-01");
        assert_eq!(findings[0].location, "Maple Retail Inc. (EF-2024-001)");
    }

    #[test]
    fn test_letter_signed_after_work_started() {
        let mut file = clean_compilation();
        file["checks"]["engagement_letter"]["date_signed"] = json!("2024-03-15");
        file["checks"]["engagement_letter"]["work_start_date"] = json!("2024-02-01");
        let findings = check_engagement_file(&file_from(file));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule_id, "ENG-02");
        assert_eq!(
            findings[0].issue,
            "Engagement letter dated 2024-03-15 but work started 2024-02-01 — letter signed after work began."
        );
    }

    #[test]
    fn test_same_day_signing_is_fine() {
        let mut file = clean_compilation();
        file["checks"]["engagement_letter"]["date_signed"] = json!("2024-02-01");
        file["checks"]["engagement_letter"]["work_start_date"] = json!("2024-02-01");
        assert!(check_engagement_file(&file_from(file)).is_empty());
    }

    #[test]
    fn test_eng02_needs_both_dates() {
        let mut file = clean_compilation();
        file["checks"]["engagement_letter"]["date_signed"] = json!("2024-03-15");
        file["checks"]["engagement_letter"]["work_start_date"] = json!("");
        assert!(check_engagement_file(&file_from(file)).is_empty());
    }

    #[test]
    fn test_eng03_only_applies_to_compilations() {
        let mut file = clean_compilation();
        file["engagement_type"] = json!("review");
        file["checks"]["engagement_letter"]["references_csrs_4200"] = json!(false);
        file["checks"]["analytical_procedures"] = json!({"performed": true});
        file["checks"]["management_representation_letter"] = json!({"obtained": true});
        assert!(check_engagement_file(&file_from(file)).is_empty());
    }

    #[test]
    fn test_review_without_procedures_or_rep_letter() {
        let mut file = clean_compilation();
        file["engagement_type"] = json!("review");
        let ids: Vec<String> = check_engagement_file(&file_from(file))
            .into_iter()
            .map(|f| f.rule_id)
            .collect();
        assert_eq!(ids, vec!["REV-01", "REV-02"]);
    }

    #[test]
    fn test_file_level_eth02_requires_issue_text() {
        let mut file = clean_compilation();
        file["checks"]["independence"]["status"] = json!("warning");
        assert!(check_engagement_file(&file_from(file.clone())).is_empty());

        file["checks"]["independence"]["issue"] =
            json!("Declaration signed after fieldwork started.");
        let findings = check_engagement_file(&file_from(file));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule_id, "ETH-02");
        assert_eq!(findings[0].severity, Severity::Warning);
    }

    #[test]
    fn test_eng05_prefers_check_issue_text() {
        let mut file = clean_compilation();
        file["checks"]["financial_statements"] = json!({
            "basis_of_accounting_note": false,
            "issue": "Note 1 omits the reporting framework."
        });
        let findings = check_engagement_file(&file_from(file));
        assert_eq!(findings[0].rule_id, "ENG-05");
        assert_eq!(findings[0].issue, "Note 1 omits the reporting framework.");
    }

    #[test]
    fn test_eng06_tristate() {
        // Absent field stays silent
        let mut file = clean_compilation();
        file["checks"]["report"] = json!({});
        assert!(check_engagement_file(&file_from(file.clone())).is_empty());

        // Explicit false fires
        file["checks"]["report"] = json!({"not_old_section_9200": false});
        let findings = check_engagement_file(&file_from(file));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule_id, "ENG-06");
        assert_eq!(
            findings[0].issue,
            "Report still uses old Section 9200 'Notice to Reader' wording."
        );
    }

    #[test]
    fn test_assembly_ok_suppresses_late_assembly() {
        let mut file = clean_compilation();
        file["checks"]["file_assembly"] = json!({
            "status": "ok",
            "assembled_within_60_days": false,
            "days_elapsed": 75
        });
        assert!(check_engagement_file(&file_from(file)).is_empty());
    }

    #[test]
    fn test_assembly_pending_is_info() {
        let mut file = clean_compilation();
        file["checks"]["file_assembly"] = json!({"status": "pending"});
        let findings = check_engagement_file(&file_from(file));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule_id, "ENG-07");
        assert_eq!(findings[0].severity, Severity::Info);
        assert_eq!(findings[0].issue, "File assembly not yet completed.");
    }

    #[test]
    fn test_late_assembly_is_warning_with_day_count() {
        let mut file = clean_compilation();
        file["checks"]["file_assembly"] = json!({
            "status": "complete",
            "assembled_within_60_days": false,
            "days_elapsed": 75
        });
        let findings = check_engagement_file(&file_from(file));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);
        assert_eq!(
            findings[0].issue,
            "File assembled 75 days after report date (exceeds 60-day limit)."
        );
    }

    #[test]
    fn test_late_assembly_needs_day_count() {
        let mut file = clean_compilation();
        file["checks"]["file_assembly"] = json!({
            "status": "complete",
            "assembled_within_60_days": false,
            "days_elapsed": 0
        });
        assert!(check_engagement_file(&file_from(file)).is_empty());
    }

    #[test]
    fn test_empty_file_fires_presence_rules_only() {
        let findings = check_engagement_file(&EngagementFile::default());
        let ids: Vec<String> = findings.into_iter().map(|f| f.rule_id).collect();
        // Tri-state and issue-gated rules stay silent on an empty file
        assert_eq!(ids, vec!["ENG-01", "ENG-03", "ENG-04", "ENG-05"]);
    }

    #[test]
    fn test_unknown_client_location() {
        let findings = check_engagement_file(&file_from(json!({"file_id": "EF-9"})));
        assert!(findings.iter().all(|f| f.location == "Unknown (EF-9)"));
    }
}
