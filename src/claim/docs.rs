//! Typed views over the SR&ED claim package documents
//!
//! The claim package is five JSON documents: client profile, projects,
//! expenditures, documentation log, and T661 form status. Unlike the
//! inspection side there is no free-form assertion walk here, so every
//! document deserializes straight into its typed shape. Missing fields take
//! their defaults; a field the preparer left out scores the same as one
//! answered "no".

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::claim::models::ClaimSeverity;

/// Everything loaded from a claim data directory.
#[derive(Debug, Clone, Default)]
pub struct ClaimData {
    pub client: ClientProfile,
    pub projects: Vec<Project>,
    pub expenditures: Expenditures,
    pub documentation: DocumentationLog,
    pub t661_form: T661Form,
}

/// Claimant corporation metadata from `client_profile.json`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClientProfile {
    pub company_name: String,
    pub business_number: String,
    pub corporation_type: String,
    pub province: String,
    /// ISO date, e.g. "2024-12-31"
    pub fiscal_year_end: String,
    pub first_time_claimant: bool,
    pub taxable_capital: f64,
    pub taxable_income_prior_year: f64,
    pub preparer: Preparer,
}

/// Third-party preparer block. `billing_arrangement` code 1 is a
/// contingency fee, which carries its own audit-risk weight.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Preparer {
    pub name: String,
    pub contact_name: String,
    pub billing_arrangement: i64,
    pub fee_percentage: Option<f64>,
}

impl Preparer {
    pub fn is_contingency_fee(&self) -> bool {
        self.billing_arrangement == 1
    }
}

/// One claimed project from `projects.json`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Project {
    pub project_id: String,
    pub title: String,
    /// "STRONG", "MEDIUM", or "INELIGIBLE"
    pub eligibility_strength: String,
    pub five_question_test: FiveQuestionTest,
    pub line_242_word_count: usize,
    pub line_244_word_count: usize,
    pub line_246_word_count: usize,
    pub line_242_scientific_technological_advancement: String,
    pub line_244_technological_uncertainty: String,
    pub line_246_work_performed: String,
}

impl Project {
    pub fn is_ineligible(&self) -> bool {
        self.eligibility_strength == "INELIGIBLE"
    }

    /// All three narrative blocks concatenated and lowercased, for keyword
    /// scanning.
    pub fn narrative_text(&self) -> String {
        format!(
            "{} {} {}",
            self.line_242_scientific_technological_advancement,
            self.line_244_technological_uncertainty,
            self.line_246_work_performed
        )
        .to_lowercase()
    }
}

/// The Northwest Hydraulic five-question test results for one project.
///
/// A question omitted from the source document counts as failed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FiveQuestionTest {
    pub q1_uncertainty: bool,
    pub q2_hypothesis: bool,
    pub q3_systematic: bool,
    pub q4_advancement: bool,
    pub q5_record: bool,
}

impl FiveQuestionTest {
    fn answers(&self) -> [(&'static str, bool); 5] {
        [
            ("q1_uncertainty", self.q1_uncertainty),
            ("q2_hypothesis", self.q2_hypothesis),
            ("q3_systematic", self.q3_systematic),
            ("q4_advancement", self.q4_advancement),
            ("q5_record", self.q5_record),
        ]
    }

    pub fn passed(&self) -> usize {
        self.answers().iter().filter(|(_, ok)| *ok).count()
    }

    /// Keys of the failed questions, in question order.
    pub fn failed_keys(&self) -> Vec<&'static str> {
        self.answers()
            .iter()
            .filter(|(_, ok)| !*ok)
            .map(|(key, _)| *key)
            .collect()
    }
}

/// Expenditure schedules from `expenditures.json`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Expenditures {
    pub salaries: Salaries,
    pub materials: Materials,
    pub contracts: Contracts,
    pub overhead: Overhead,
    /// Pre-flagged expenditure problems carried in the package itself; each
    /// passes through to the issue list with its own severity.
    pub deliberate_errors: Vec<ExpenditureError>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Salaries {
    /// As-filed Line 300 total
    pub total_sred_salaries: f64,
    pub breakdown: Vec<SalaryEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SalaryEntry {
    pub name: String,
    pub total_salary: f64,
    pub sred_portion: f64,
    /// Claimed salary dollars per project id
    pub project_allocation: BTreeMap<String, f64>,
    /// 10%+ shareholder, subject to the PPA salary cap
    pub specified_employee: bool,
    pub paid_within_180_days: bool,
    pub ownership_percentage: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Materials {
    /// As-filed Line 360 total
    pub line_360_total: f64,
    pub items: Vec<MaterialItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MaterialItem {
    pub description: String,
    pub amount: f64,
    pub project: String,
    pub consumed_or_transformed: Option<String>,
    pub eligible: bool,
    pub flag_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Contracts {
    /// As-filed Line 370 total
    pub line_370_total: f64,
    pub items: Vec<ContractItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContractItem {
    pub payee: String,
    pub amount: f64,
    pub project: String,
    pub arms_length: bool,
    pub contract_specifies_sred: bool,
    pub itc_eligible_amount: Option<f64>,
    pub eligible: bool,
    pub flag_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Overhead {
    pub proxy_base_salaries: f64,
    /// As-filed prescribed proxy amount
    pub proxy_amount: f64,
    pub note: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExpenditureError {
    pub severity: ClaimSeverity,
    /// Expenditure schedule the error sits in, e.g. "Salaries"
    pub category: Option<String>,
    pub description: String,
    pub remediation: String,
}

/// Evidence trail from `documentation_log.json`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DocumentationLog {
    /// T661 Lines 270-282 checklist: line key -> project id -> state.
    /// States are `true`, `false`, `"partial"`, or `"wrong_type"`.
    pub t661_evidence_checklist: BTreeMap<String, BTreeMap<String, Value>>,
    pub evidence_items: Vec<EvidenceItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EvidenceItem {
    pub project: String,
    pub title: String,
    #[serde(rename = "type")]
    pub item_type: String,
    /// Marks a contemporaneous-documentation gap; the gap_* fields describe it
    pub gap_flag: bool,
    pub flag: bool,
    pub gap_start: Option<String>,
    pub gap_end: Option<String>,
    pub gap_reason: Option<String>,
}

/// Form status from `t661_form_data.json`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct T661Form {
    pub form_version: String,
    /// Keyed by part key, e.g. "part_1_general_info"
    pub parts_status: BTreeMap<String, PartStatus>,
}

impl T661Form {
    pub fn complete_parts(&self) -> usize {
        self.parts_status
            .values()
            .filter(|p| p.status == "COMPLETE")
            .count()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PartStatus {
    /// COMPLETE, WARNING, ISSUES_FOUND, INCOMPLETE, NOT_CALCULATED, NOT_SIGNED
    pub status: String,
    pub issues: Vec<String>,
}
