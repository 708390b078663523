//! Claim-readiness pipeline
//!
//! Runs the eligibility, expenditure, documentation, and form checks over a
//! loaded claim file set and projects a composite readiness score with a
//! risk band, an as-filed versus corrected expenditure comparison, and an
//! investment tax credit estimate. Like the inspection scan, the result is a
//! pure function of the loaded documents plus an explicit `as_of` date.

pub mod catalog;
pub mod constants;
pub mod docs;
pub mod expenditure;
pub mod issues;
pub mod itc;
pub mod models;
pub mod narrative;
pub mod scoring;

use chrono::NaiveDate;
use tracing::{debug, info};

use docs::ClaimData;
use models::{ClaimReport, ClaimSummary, ExpenditureComparison, ExtendedScores, RiskBand};

/// Execute the full claim readiness scan.
pub fn run_claim_scan(data: &ClaimData, as_of: NaiveDate) -> ClaimReport {
    debug!(
        "Scoring {} projects for {}",
        data.projects.len(),
        data.client.company_name
    );

    let excluded = expenditure::ineligible_project_ids(&data.projects);
    let expenditures = ExpenditureComparison {
        as_filed: expenditure::uncorrected_totals(&data.expenditures),
        corrected: expenditure::corrected_totals(&data.expenditures, &excluded),
    };

    let (overall_score, subscores) = scoring::overall_score(
        &data.projects,
        &data.expenditures,
        &data.documentation,
        &data.t661_form,
    );
    let risk_band = RiskBand::from_score(overall_score);

    let issues = issues::collect_issues(data);

    let extended = ExtendedScores {
        narrative: scoring::narrative_score(&data.projects),
        preparer: scoring::preparer_score(&data.client),
        filing: scoring::filing_position(&data.client, as_of),
    };

    let summary = ClaimSummary {
        projects_total: data.projects.len(),
        projects_eligible: data.projects.iter().filter(|p| !p.is_ineligible()).count(),
        expenditure_issues: data.expenditures.deliberate_errors.len(),
        documentation_gaps: data
            .documentation
            .evidence_items
            .iter()
            .filter(|item| item.gap_flag)
            .count(),
        form_parts_complete: data.t661_form.complete_parts(),
        form_parts_total: data.t661_form.parts_status.len(),
    };

    let specified_employee_caps = expenditure::specified_employee_caps(&data.expenditures);
    let itc = itc::estimate(&data.client, &expenditures);
    let narratives = data.projects.iter().map(narrative::assess_project).collect();

    info!(
        "Claim scan complete: score {}/100 ({}), {} issues, corrected total ${:.0}",
        overall_score,
        risk_band,
        issues.len(),
        expenditures.corrected.total
    );

    ClaimReport {
        company_name: data.client.company_name.clone(),
        business_number: data.client.business_number.clone(),
        fiscal_year_end: data.client.fiscal_year_end.clone(),
        report_date: as_of.format("%Y-%m-%d").to_string(),
        overall_score,
        risk_band,
        subscores,
        extended,
        summary,
        issues,
        expenditures,
        specified_employee_caps,
        itc,
        narratives,
    }
}
