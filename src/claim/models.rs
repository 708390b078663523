//! Data models for the claim-readiness pipeline
//!
//! Issue and report shapes are value objects; the composite score, band, and
//! expenditure projections are computed once by the scan and stored, never
//! recomputed on read.

use serde::{Deserialize, Serialize};

/// Severity levels for claim issues, as they appear in the source data and
/// reports ("HIGH"/"MEDIUM"/"LOW").
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum ClaimSeverity {
    #[default]
    Low,
    Medium,
    High,
}

impl ClaimSeverity {
    pub fn tag(&self) -> &'static str {
        match self {
            ClaimSeverity::High => "HIGH",
            ClaimSeverity::Medium => "MEDIUM",
            ClaimSeverity::Low => "LOW",
        }
    }

    /// Sort rank for report ordering: HIGH first.
    pub fn rank(&self) -> u8 {
        match self {
            ClaimSeverity::High => 0,
            ClaimSeverity::Medium => 1,
            ClaimSeverity::Low => 2,
        }
    }
}

impl std::fmt::Display for ClaimSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// A single issue found anywhere in the claim package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimIssue {
    pub severity: ClaimSeverity,
    /// "Eligibility", "Expenditure", "Documentation", or "Preparer"
    pub category: String,
    pub issue: String,
    /// Project id the issue belongs to, or a schedule/"All" label
    pub project: String,
    pub remediation: String,
}

/// The four weighted subscores behind the composite, each 0-100
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscores {
    pub eligibility: i64,
    pub expenditure: i64,
    pub documentation: i64,
    pub form: i64,
}

/// Risk band derived from the composite score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskBand {
    #[serde(rename = "HIGH RISK")]
    High,
    #[serde(rename = "MEDIUM RISK")]
    Medium,
    #[serde(rename = "LOW RISK")]
    Low,
}

impl RiskBand {
    /// Bands are inclusive at the top: 40 is still HIGH, 70 still MEDIUM.
    pub fn from_score(score: i64) -> Self {
        if score <= 40 {
            RiskBand::High
        } else if score <= 70 {
            RiskBand::Medium
        } else {
            RiskBand::Low
        }
    }
}

impl std::fmt::Display for RiskBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskBand::High => write!(f, "HIGH RISK"),
            RiskBand::Medium => write!(f, "MEDIUM RISK"),
            RiskBand::Low => write!(f, "LOW RISK"),
        }
    }
}

/// One expenditure state: the four schedule totals plus their sum
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenditureTotals {
    pub salaries: f64,
    pub materials: f64,
    pub contracts: f64,
    pub ppa: f64,
    pub total: f64,
}

/// As-filed totals next to the corrected projection. Both states are kept;
/// correction is a hypothetical recomputation, not a mutation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenditureComparison {
    pub as_filed: ExpenditureTotals,
    pub corrected: ExpenditureTotals,
}

/// PPA salary cap for one specified employee: lesser of 75% of salary or
/// 2.5x YMPE.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecifiedEmployeeCap {
    pub name: String,
    pub ownership_percentage: Option<f64>,
    pub cap_salary_pct: f64,
    pub cap_ympe: f64,
    pub ppa_cap: f64,
}

/// One provincial credit line in the ITC estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvincialCreditLine {
    pub code: String,
    pub name: String,
    pub amount: f64,
    pub refundable: bool,
}

/// Federal and provincial investment tax credit estimate on the corrected
/// qualified expenditures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItcEstimate {
    pub qualified_expenditures: f64,
    /// Taxable capital under the $15M phase-out floor
    pub capital_under_threshold: bool,
    /// Prior-year taxable income under the $500k phase-out floor
    pub income_under_threshold: bool,
    /// Tiered federal ITC: 35% on the first $6M, 15% above
    pub federal: f64,
    pub provincial: Vec<ProvincialCreditLine>,
    /// Set when the province has no SR&ED credit program
    pub provincial_note: Option<String>,
    pub provincial_total: f64,
    pub provincial_refundable: f64,
    pub total_credits: f64,
    pub total_refundable: f64,
    /// Flat enhanced-rate federal ITC on the as-filed total, for comparison
    pub as_filed_federal: f64,
}

/// Length band for one narrative line, on strict <50% / <75% breakpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeBand {
    TooBrief,
    Adequate,
    Good,
}

impl NarrativeBand {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio < 0.5 {
            NarrativeBand::TooBrief
        } else if ratio < 0.75 {
            NarrativeBand::Adequate
        } else {
            NarrativeBand::Good
        }
    }
}

/// Word-count assessment of one T661 Part 2 narrative line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeLine {
    /// "242", "244", or "246"
    pub line: String,
    pub label: String,
    pub word_count: usize,
    pub limit: usize,
    pub ratio: f64,
    pub band: NarrativeBand,
}

/// Presence of one quality keyword in a project's narratives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityIndicator {
    pub keyword: String,
    pub label: String,
    pub present: bool,
}

/// Narrative assessment for one project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeAssessment {
    pub project_id: String,
    pub lines: Vec<NarrativeLine>,
    /// Empty for ineligible projects; keyword quality is not assessed there
    pub quality: Vec<QualityIndicator>,
}

/// Filing deadline position: 18 months from fiscal year end, no extensions.
///
/// `deadline` and `days_remaining` are None when the fiscal year end does
/// not parse; the score is then 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingPosition {
    pub deadline: Option<String>,
    pub days_remaining: Option<i64>,
    pub score: i64,
}

/// Supplementary risk axes beyond the four composite subscores
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedScores {
    pub narrative: i64,
    pub preparer: i64,
    pub filing: FilingPosition,
}

/// Headline counts for the dashboard surfaces
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSummary {
    pub projects_total: usize,
    pub projects_eligible: usize,
    pub expenditure_issues: usize,
    pub documentation_gaps: usize,
    pub form_parts_complete: usize,
    pub form_parts_total: usize,
}

/// Complete result of one claim readiness scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimReport {
    pub company_name: String,
    pub business_number: String,
    pub fiscal_year_end: String,
    /// ISO date the scan was run against (supplied, not wall clock)
    pub report_date: String,
    pub overall_score: i64,
    pub risk_band: RiskBand,
    pub subscores: Subscores,
    pub extended: ExtendedScores,
    pub summary: ClaimSummary,
    pub issues: Vec<ClaimIssue>,
    pub expenditures: ExpenditureComparison,
    pub specified_employee_caps: Vec<SpecifiedEmployeeCap>,
    pub itc: ItcEstimate,
    pub narratives: Vec<NarrativeAssessment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_serde_uppercase() {
        assert_eq!(
            serde_json::to_string(&ClaimSeverity::High).unwrap(),
            "\"HIGH\""
        );
        let parsed: ClaimSeverity = serde_json::from_str("\"MEDIUM\"").unwrap();
        assert_eq!(parsed, ClaimSeverity::Medium);
    }

    #[test]
    fn test_severity_rank_orders_high_first() {
        assert!(ClaimSeverity::High.rank() < ClaimSeverity::Medium.rank());
        assert!(ClaimSeverity::Medium.rank() < ClaimSeverity::Low.rank());
    }

    #[test]
    fn test_risk_band_boundaries() {
        assert_eq!(RiskBand::from_score(0), RiskBand::High);
        assert_eq!(RiskBand::from_score(40), RiskBand::High);
        assert_eq!(RiskBand::from_score(41), RiskBand::Medium);
        assert_eq!(RiskBand::from_score(70), RiskBand::Medium);
        assert_eq!(RiskBand::from_score(71), RiskBand::Low);
        assert_eq!(RiskBand::from_score(100), RiskBand::Low);
    }

    #[test]
    fn test_risk_band_labels() {
        assert_eq!(RiskBand::High.to_string(), "HIGH RISK");
        assert_eq!(
            serde_json::to_string(&RiskBand::Medium).unwrap(),
            "\"MEDIUM RISK\""
        );
    }

    #[test]
    fn test_narrative_band_strict_breakpoints() {
        assert_eq!(NarrativeBand::from_ratio(0.49), NarrativeBand::TooBrief);
        assert_eq!(NarrativeBand::from_ratio(0.5), NarrativeBand::Adequate);
        assert_eq!(NarrativeBand::from_ratio(0.74), NarrativeBand::Adequate);
        assert_eq!(NarrativeBand::from_ratio(0.75), NarrativeBand::Good);
        assert_eq!(NarrativeBand::from_ratio(1.2), NarrativeBand::Good);
    }
}
