//! As-filed and corrected expenditure projections
//!
//! The corrected projection recomputes each schedule with the excluded
//! projects' allocations and individually-flagged items removed, then
//! rebuilds the PPA from the corrected salary base. The as-filed state reads
//! the stored line totals untouched, so both states can be compared side by
//! side.

use std::collections::BTreeSet;

use crate::claim::constants::{
    PROXY_RATE, SPECIFIED_EMPLOYEE_PPA_CAP_MULTIPLIER, SPECIFIED_EMPLOYEE_SALARY_PERCENTAGE,
    YMPE_2024,
};
use crate::claim::docs::{Expenditures, Project};
use crate::claim::models::{ExpenditureTotals, SpecifiedEmployeeCap};

/// Project ids whose allocations drop out of the corrected projection.
pub fn ineligible_project_ids(projects: &[Project]) -> BTreeSet<String> {
    projects
        .iter()
        .filter(|p| p.is_ineligible())
        .map(|p| p.project_id.clone())
        .collect()
}

/// As-filed totals straight off the stored line amounts.
pub fn uncorrected_totals(expenditures: &Expenditures) -> ExpenditureTotals {
    let salaries = expenditures.salaries.total_sred_salaries;
    let materials = expenditures.materials.line_360_total;
    let contracts = expenditures.contracts.line_370_total;
    let ppa = expenditures.overhead.proxy_amount;
    ExpenditureTotals {
        salaries,
        materials,
        contracts,
        ppa,
        total: salaries + materials + contracts + ppa,
    }
}

/// Corrected totals with excluded-project allocations and ineligible items
/// removed, and the PPA recomputed from the corrected salary base.
pub fn corrected_totals(
    expenditures: &Expenditures,
    excluded: &BTreeSet<String>,
) -> ExpenditureTotals {
    let mut salaries = 0.0;
    for entry in &expenditures.salaries.breakdown {
        for (project_id, amount) in &entry.project_allocation {
            if !excluded.contains(project_id) {
                salaries += amount;
            }
        }
    }

    let materials: f64 = expenditures
        .materials
        .items
        .iter()
        .filter(|m| m.eligible && !excluded.contains(&m.project))
        .map(|m| m.amount)
        .sum();

    let contracts: f64 = expenditures
        .contracts
        .items
        .iter()
        .filter(|c| c.eligible && !excluded.contains(&c.project))
        .map(|c| c.amount)
        .sum();

    let ppa = (salaries * PROXY_RATE).round();

    ExpenditureTotals {
        salaries,
        materials,
        contracts,
        ppa,
        total: salaries + materials + contracts + ppa,
    }
}

/// Total spend allocated to one project across all three schedules. Used as
/// the eligibility-score weight, so flagged items still count here.
pub fn project_spend(expenditures: &Expenditures, project_id: &str) -> f64 {
    let mut spend = 0.0;
    for entry in &expenditures.salaries.breakdown {
        spend += entry
            .project_allocation
            .get(project_id)
            .copied()
            .unwrap_or(0.0);
    }
    for item in &expenditures.materials.items {
        if item.project == project_id {
            spend += item.amount;
        }
    }
    for item in &expenditures.contracts.items {
        if item.project == project_id {
            spend += item.amount;
        }
    }
    spend
}

/// PPA salary caps for every specified employee in the salary breakdown.
pub fn specified_employee_caps(expenditures: &Expenditures) -> Vec<SpecifiedEmployeeCap> {
    expenditures
        .salaries
        .breakdown
        .iter()
        .filter(|entry| entry.specified_employee)
        .map(|entry| {
            let cap_salary_pct = entry.total_salary * SPECIFIED_EMPLOYEE_SALARY_PERCENTAGE;
            let cap_ympe = YMPE_2024 * SPECIFIED_EMPLOYEE_PPA_CAP_MULTIPLIER;
            SpecifiedEmployeeCap {
                name: entry.name.clone(),
                ownership_percentage: entry.ownership_percentage,
                cap_salary_pct,
                cap_ympe,
                ppa_cap: cap_salary_pct.min(cap_ympe),
            }
        })
        .collect()
}
