//! Claim readiness subscores and the weighted composite
//!
//! Four subscores feed the composite: eligibility 35%, expenditure accuracy
//! 25%, documentation 25%, form completeness 15%. Three supplementary axes
//! (narratives, preparer, filing timeline) sit outside the composite and
//! feed the risk breakdown only.

use chrono::{Duration, NaiveDate};
use serde_json::Value;

use crate::claim::constants::{
    FILING_DEADLINE_MONTHS, LINE_242_WORD_LIMIT, LINE_244_WORD_LIMIT, LINE_246_WORD_LIMIT,
};
use crate::claim::docs::{ClientProfile, DocumentationLog, Expenditures, Project, T661Form};
use crate::claim::expenditure::project_spend;
use crate::claim::models::{ClaimSeverity, FilingPosition, Subscores};

const WEIGHT_ELIGIBILITY: f64 = 0.35;
const WEIGHT_EXPENDITURE: f64 = 0.25;
const WEIGHT_DOCUMENTATION: f64 = 0.25;
const WEIGHT_FORM: f64 = 0.15;

/// Fixed blend of per-project documentation percentages. Deliberately not
/// spend-based: the two substantive projects dominate and the third counts
/// for a residual tenth, projects absent from the checklist contribute 0.
const DOC_PROJECT_WEIGHTS: &[(&str, f64)] = &[("P001", 0.45), ("P002", 0.45), ("P003", 0.10)];

/// Per-project `(questions_passed / 5) * 100`, averaged with each project
/// weighted by its share of allocated spend. Zero total spend scores 0.
pub fn eligibility_score(projects: &[Project], expenditures: &Expenditures) -> i64 {
    let spends: Vec<f64> = projects
        .iter()
        .map(|p| project_spend(expenditures, &p.project_id))
        .collect();
    let total_spend: f64 = spends.iter().sum();
    if total_spend == 0.0 {
        return 0;
    }

    let weighted: f64 = projects
        .iter()
        .zip(&spends)
        .map(|(p, spend)| {
            let score = (p.five_question_test.passed() as f64 / 5.0) * 100.0;
            score * (spend / total_spend)
        })
        .sum();
    weighted.round() as i64
}

/// Start at 100, deduct 15/10/5 per HIGH/MEDIUM/LOW flagged error, floor 0.
pub fn expenditure_accuracy_score(expenditures: &Expenditures) -> i64 {
    let mut score: i64 = 100;
    for error in &expenditures.deliberate_errors {
        score -= match error.severity {
            ClaimSeverity::High => 15,
            ClaimSeverity::Medium => 10,
            ClaimSeverity::Low => 5,
        };
    }
    score.max(0)
}

/// Checklist state weight: present = 1, partial or wrong-type = 0.5, else 0.
fn checklist_weight(value: &Value) -> f64 {
    match value {
        Value::Bool(true) => 1.0,
        Value::String(s) if s == "partial" || s == "wrong_type" => 0.5,
        _ => 0.0,
    }
}

/// Per-project completion percentage over the evidence checklist, then the
/// fixed project blend. An empty checklist scores 0.
pub fn documentation_score(documentation: &DocumentationLog) -> i64 {
    let mut scores: std::collections::BTreeMap<&str, f64> = Default::default();
    let mut counts: std::collections::BTreeMap<&str, usize> = Default::default();

    for project_vals in documentation.t661_evidence_checklist.values() {
        for (project_id, value) in project_vals {
            *scores.entry(project_id.as_str()).or_default() += checklist_weight(value);
            *counts.entry(project_id.as_str()).or_default() += 1;
        }
    }

    let mut pcts: std::collections::BTreeMap<&str, f64> = Default::default();
    for (project_id, count) in &counts {
        if *count > 0 {
            pcts.insert(project_id, (scores[project_id] / *count as f64) * 100.0);
        }
    }

    if pcts.is_empty() {
        return 0;
    }
    let weighted: f64 = DOC_PROJECT_WEIGHTS
        .iter()
        .map(|(project_id, weight)| pcts.get(project_id).copied().unwrap_or(0.0) * weight)
        .sum();
    weighted.round() as i64
}

/// Parts with status COMPLETE count 1.0, WARNING 0.5, over total parts.
pub fn form_completeness_score(form: &T661Form) -> i64 {
    let total = form.parts_status.len();
    if total == 0 {
        return 0;
    }
    let complete: f64 = form
        .parts_status
        .values()
        .map(|part| match part.status.as_str() {
            "COMPLETE" => 1.0,
            "WARNING" => 0.5,
            _ => 0.0,
        })
        .sum();
    ((complete / total as f64) * 100.0).round() as i64
}

/// Weighted composite of the four subscores, rounded to an integer.
pub fn overall_score(
    projects: &[Project],
    expenditures: &Expenditures,
    documentation: &DocumentationLog,
    form: &T661Form,
) -> (i64, Subscores) {
    let subscores = Subscores {
        eligibility: eligibility_score(projects, expenditures),
        expenditure: expenditure_accuracy_score(expenditures),
        documentation: documentation_score(documentation),
        form: form_completeness_score(form),
    };
    let composite = subscores.eligibility as f64 * WEIGHT_ELIGIBILITY
        + subscores.expenditure as f64 * WEIGHT_EXPENDITURE
        + subscores.documentation as f64 * WEIGHT_DOCUMENTATION
        + subscores.form as f64 * WEIGHT_FORM;
    (composite.round() as i64, subscores)
}

/// Mean narrative length score over non-ineligible projects: each project is
/// the average of its three line percentages, capped at 100. No assessable
/// projects scores 0.
pub fn narrative_score(projects: &[Project]) -> i64 {
    let scores: Vec<f64> = projects
        .iter()
        .filter(|p| !p.is_ineligible())
        .map(|p| {
            let pct_242 = p.line_242_word_count as f64 / LINE_242_WORD_LIMIT as f64 * 100.0;
            let pct_244 = p.line_244_word_count as f64 / LINE_244_WORD_LIMIT as f64 * 100.0;
            let pct_246 = p.line_246_word_count as f64 / LINE_246_WORD_LIMIT as f64 * 100.0;
            ((pct_242 + pct_244 + pct_246) / 3.0).min(100.0)
        })
        .collect();
    if scores.is_empty() {
        return 0;
    }
    (scores.iter().sum::<f64>() / scores.len() as f64).round() as i64
}

/// 60 under a contingency-fee arrangement, 100 otherwise.
pub fn preparer_score(client: &ClientProfile) -> i64 {
    if client.preparer.is_contingency_fee() {
        60
    } else {
        100
    }
}

/// Filing deadline position. 540 days of runway maps to 100; past-deadline
/// clamps at 0. An unparseable fiscal year end scores 0 with no deadline.
pub fn filing_position(client: &ClientProfile, as_of: NaiveDate) -> FilingPosition {
    let Ok(fiscal_end) = NaiveDate::parse_from_str(&client.fiscal_year_end, "%Y-%m-%d") else {
        return FilingPosition::default();
    };
    let deadline = fiscal_end + Duration::days(FILING_DEADLINE_MONTHS * 30);
    let days_remaining = (deadline - as_of).num_days();
    let score = (days_remaining as f64 / 5.4).clamp(0.0, 100.0).round() as i64;
    FilingPosition {
        deadline: Some(deadline.format("%Y-%m-%d").to_string()),
        days_remaining: Some(days_remaining),
        score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn project(id: &str, strength: &str, passed: usize) -> Project {
        let mut fqt = serde_json::Map::new();
        for (i, key) in [
            "q1_uncertainty",
            "q2_hypothesis",
            "q3_systematic",
            "q4_advancement",
            "q5_record",
        ]
        .iter()
        .enumerate()
        {
            fqt.insert(key.to_string(), json!(i < passed));
        }
        serde_json::from_value(json!({
            "project_id": id,
            "title": format!("{id} test project"),
            "eligibility_strength": strength,
            "five_question_test": fqt
        }))
        .unwrap()
    }

    fn expenditures_with_spend(spend: &[(&str, f64)]) -> Expenditures {
        let allocation: serde_json::Map<String, Value> = spend
            .iter()
            .map(|(pid, amount)| (pid.to_string(), json!(amount)))
            .collect();
        serde_json::from_value(json!({
            "salaries": {
                "total_sred_salaries": 0,
                "breakdown": [{"name": "A", "total_salary": 0, "sred_portion": 0,
                               "project_allocation": allocation,
                               "specified_employee": false, "paid_within_180_days": true}]
            },
            "materials": {"line_360_total": 0, "items": []},
            "contracts": {"line_370_total": 0, "items": []},
            "overhead": {"proxy_base_salaries": 0, "proxy_amount": 0, "note": ""},
            "deliberate_errors": []
        }))
        .unwrap()
    }

    #[test]
    fn test_eligibility_score_is_spend_weighted() {
        let projects = vec![project("P001", "STRONG", 5), project("P002", "INELIGIBLE", 0)];
        // 75% of spend on the 5/5 project, 25% on the 0/5 one.
        let expenditures = expenditures_with_spend(&[("P001", 75000.0), ("P002", 25000.0)]);
        assert_eq!(eligibility_score(&projects, &expenditures), 75);
    }

    #[test]
    fn test_eligibility_three_of_five_scores_sixty() {
        let projects = vec![project("P001", "MEDIUM", 3)];
        let expenditures = expenditures_with_spend(&[("P001", 10000.0)]);
        assert_eq!(eligibility_score(&projects, &expenditures), 60);
    }

    #[test]
    fn test_eligibility_zero_spend_scores_zero() {
        let projects = vec![project("P001", "STRONG", 5)];
        let expenditures = expenditures_with_spend(&[]);
        assert_eq!(eligibility_score(&projects, &expenditures), 0);
    }

    #[test]
    fn test_expenditure_score_deductions_and_floor() {
        let mut expenditures = Expenditures::default();
        assert_eq!(expenditure_accuracy_score(&expenditures), 100);

        expenditures.deliberate_errors = serde_json::from_value(json!([
            {"severity": "HIGH", "description": "a", "remediation": "r"},
            {"severity": "MEDIUM", "description": "b", "remediation": "r"},
            {"severity": "LOW", "description": "c", "remediation": "r"}
        ]))
        .unwrap();
        assert_eq!(expenditure_accuracy_score(&expenditures), 70);

        expenditures.deliberate_errors = (0..8)
            .map(|i| {
                serde_json::from_value(json!({
                    "severity": "HIGH",
                    "description": format!("error {i}"),
                    "remediation": "r"
                }))
                .unwrap()
            })
            .collect();
        assert_eq!(expenditure_accuracy_score(&expenditures), 0);
    }

    #[test]
    fn test_documentation_score_weights_and_partial_credit() {
        let documentation: DocumentationLog = serde_json::from_value(json!({
            "t661_evidence_checklist": {
                "line_270_lab_notebooks": {"P001": true, "P002": "partial", "P003": false},
                "line_276_test_protocols_data": {"P001": true, "P002": true, "P003": "wrong_type"}
            },
            "evidence_items": []
        }))
        .unwrap();
        // P001: 2/2 = 100, P002: 1.5/2 = 75, P003: 0.5/2 = 25.
        // Blend: 100*0.45 + 75*0.45 + 25*0.10 = 81.25 -> 81.
        assert_eq!(documentation_score(&documentation), 81);
    }

    #[test]
    fn test_documentation_score_empty_checklist_is_zero() {
        assert_eq!(documentation_score(&DocumentationLog::default()), 0);
    }

    #[test]
    fn test_documentation_unknown_project_contributes_nothing() {
        let documentation: DocumentationLog = serde_json::from_value(json!({
            "t661_evidence_checklist": {
                "line_270_lab_notebooks": {"P777": true}
            },
            "evidence_items": []
        }))
        .unwrap();
        // Percentages exist, but no weighted project matches.
        assert_eq!(documentation_score(&documentation), 0);
    }

    #[test]
    fn test_form_score_half_credit_for_warning() {
        let form: T661Form = serde_json::from_value(json!({
            "parts_status": {
                "part_1_general_info": {"status": "COMPLETE"},
                "part_2_project_info": {"status": "ISSUES_FOUND"},
                "part_3_expenditures": {"status": "WARNING"},
                "part_4_qualified_expenditures": {"status": "COMPLETE"}
            }
        }))
        .unwrap();
        // (1 + 0 + 0.5 + 1) / 4 = 62.5% -> 63 (round half away from zero).
        assert_eq!(form_completeness_score(&form), 63);
        assert_eq!(form_completeness_score(&T661Form::default()), 0);
    }

    #[test]
    fn test_overall_composite_weighting() {
        let projects = vec![project("P001", "STRONG", 5)];
        let expenditures = expenditures_with_spend(&[("P001", 50000.0)]);
        let documentation: DocumentationLog = serde_json::from_value(json!({
            "t661_evidence_checklist": {
                "line_270_lab_notebooks": {"P001": true}
            },
            "evidence_items": []
        }))
        .unwrap();
        let form: T661Form = serde_json::from_value(json!({
            "parts_status": {"part_1_general_info": {"status": "COMPLETE"}}
        }))
        .unwrap();

        let (overall, subscores) = overall_score(&projects, &expenditures, &documentation, &form);
        assert_eq!(subscores.eligibility, 100);
        assert_eq!(subscores.expenditure, 100);
        // P001 at 100% carries weight 0.45 only.
        assert_eq!(subscores.documentation, 45);
        assert_eq!(subscores.form, 100);
        // 100*0.35 + 100*0.25 + 45*0.25 + 100*0.15 = 86.25 -> 86
        assert_eq!(overall, 86);
    }

    #[test]
    fn test_narrative_score_caps_and_skips_ineligible() {
        let mut strong = project("P001", "STRONG", 5);
        strong.line_242_word_count = 350;
        strong.line_244_word_count = 700;
        strong.line_246_word_count = 350;

        let mut brief = project("P002", "MEDIUM", 4);
        brief.line_242_word_count = 175;
        brief.line_244_word_count = 350;
        brief.line_246_word_count = 175;

        let mut ignored = project("P003", "INELIGIBLE", 0);
        ignored.line_242_word_count = 9999;

        let projects = vec![strong, brief, ignored];
        // 100 and 50, averaged.
        assert_eq!(narrative_score(&projects), 75);
        assert_eq!(narrative_score(&[project("P003", "INELIGIBLE", 0)]), 0);
    }

    #[test]
    fn test_preparer_score() {
        let mut client = ClientProfile::default();
        assert_eq!(preparer_score(&client), 100);
        client.preparer.billing_arrangement = 1;
        assert_eq!(preparer_score(&client), 60);
    }

    #[test]
    fn test_filing_position_scoring() {
        let mut client = ClientProfile::default();
        client.fiscal_year_end = "2024-12-31".to_string();
        let as_of = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();

        let position = filing_position(&client, as_of);
        // 2024-12-31 + 540 days = 2026-06-24.
        assert_eq!(position.deadline.as_deref(), Some("2026-06-24"));
        let days = position.days_remaining.unwrap();
        assert_eq!(days, 480);
        // 480 / 5.4 rounds to 89.
        assert_eq!(position.score, 89);
    }

    #[test]
    fn test_filing_position_past_deadline_clamps_to_zero() {
        let mut client = ClientProfile::default();
        client.fiscal_year_end = "2020-12-31".to_string();
        let position = filing_position(&client, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(position.score, 0);
        assert!(position.days_remaining.unwrap() < 0);
    }

    #[test]
    fn test_filing_position_unparseable_year_end() {
        let mut client = ClientProfile::default();
        client.fiscal_year_end = "FY2024".to_string();
        let position = filing_position(&client, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(position, FilingPosition::default());
    }
}
