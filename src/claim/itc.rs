//! Federal and provincial investment tax credit estimation
//!
//! The federal ITC is tiered: 35% on the first $6M of qualified
//! expenditures, 15% above. Provincial programs come in three shapes (flat
//! rate with an optional limit, Quebec's two-tier rate, Alberta's
//! base-plus-incremental), each rounded per component the way the forms do
//! it. Provincial credits are estimated gross; the government-assistance
//! offset against the federal base is out of scope here.

use crate::claim::constants::{
    ITC_CCPC_BASE_RATE, ITC_CCPC_ENHANCED_LIMIT, ITC_CCPC_ENHANCED_RATE,
    TAXABLE_CAPITAL_PHASEOUT_LOW, TAXABLE_INCOME_PHASEOUT_LOW,
};
use crate::claim::docs::ClientProfile;
use crate::claim::models::{ExpenditureComparison, ItcEstimate, ProvincialCreditLine};

/// How one provincial credit computes from qualified expenditures
#[derive(Debug, Clone, Copy)]
pub enum CreditStructure {
    /// rate x min(qualified, limit)
    Flat { rate: f64, limit: Option<f64> },
    /// One rate up to the threshold, another above it (Quebec)
    TwoTier {
        rate_first: f64,
        rate_above: f64,
        threshold: f64,
    },
    /// Base rate on everything plus an incremental rate up to a limit
    /// (Alberta)
    BaseIncremental {
        rate_base: f64,
        rate_incremental: f64,
        incremental_limit: f64,
    },
}

impl CreditStructure {
    /// Credit amount for the given qualified expenditures, rounded per
    /// component.
    pub fn amount(&self, qualified: f64) -> f64 {
        match self {
            CreditStructure::Flat { rate, limit } => {
                let base = limit.map_or(qualified, |l| qualified.min(l));
                (base * rate).round()
            }
            CreditStructure::TwoTier {
                rate_first,
                rate_above,
                threshold,
            } => {
                let first = qualified.min(*threshold);
                let above = (qualified - threshold).max(0.0);
                (first * rate_first).round() + (above * rate_above).round()
            }
            CreditStructure::BaseIncremental {
                rate_base,
                rate_incremental,
                incremental_limit,
            } => {
                let base = (qualified * rate_base).round();
                let incremental = (qualified.min(*incremental_limit) * rate_incremental).round();
                base + incremental
            }
        }
    }
}

/// One provincial SR&ED credit program
#[derive(Debug, Clone, Copy)]
pub struct ProvincialProgram {
    pub province: &'static str,
    pub code: &'static str,
    pub name: &'static str,
    pub refundable: bool,
    pub structure: CreditStructure,
}

/// Provincial credit programs for the 2024 tax year, in program order per
/// province.
pub static PROVINCIAL_PROGRAMS: &[ProvincialProgram] = &[
    ProvincialProgram {
        province: "Ontario",
        code: "OITC",
        name: "Ontario Innovation Tax Credit",
        refundable: true,
        structure: CreditStructure::Flat {
            rate: 0.08,
            limit: Some(3_000_000.0),
        },
    },
    ProvincialProgram {
        province: "Ontario",
        code: "ORDTC",
        name: "Ontario R&D Tax Credit",
        refundable: false,
        structure: CreditStructure::Flat {
            rate: 0.035,
            limit: None,
        },
    },
    ProvincialProgram {
        province: "Quebec",
        code: "CRIC",
        name: "Credit for R&D (new March 2025)",
        refundable: true,
        structure: CreditStructure::TwoTier {
            rate_first: 0.30,
            rate_above: 0.20,
            threshold: 1_000_000.0,
        },
    },
    ProvincialProgram {
        province: "British Columbia",
        code: "BCITC",
        name: "BC SR&ED Tax Credit",
        refundable: true,
        structure: CreditStructure::Flat {
            rate: 0.10,
            limit: Some(3_000_000.0),
        },
    },
    ProvincialProgram {
        province: "Alberta",
        code: "ASRDITC",
        name: "Alberta SR&ED Tax Credit",
        refundable: false,
        structure: CreditStructure::BaseIncremental {
            rate_base: 0.08,
            rate_incremental: 0.20,
            incremental_limit: 4_000_000.0,
        },
    },
    // Saskatchewan's half-refundable CCPC portion and Manitoba's partial
    // refundability are not modelled; both estimate as non-refundable.
    ProvincialProgram {
        province: "Saskatchewan",
        code: "SRITC",
        name: "Saskatchewan R&D Tax Credit",
        refundable: false,
        structure: CreditStructure::Flat {
            rate: 0.10,
            limit: Some(1_000_000.0),
        },
    },
    ProvincialProgram {
        province: "Manitoba",
        code: "MRITC",
        name: "Manitoba R&D Tax Credit",
        refundable: false,
        structure: CreditStructure::Flat {
            rate: 0.15,
            limit: None,
        },
    },
    ProvincialProgram {
        province: "New Brunswick",
        code: "NBRITC",
        name: "NB R&D Tax Credit",
        refundable: true,
        structure: CreditStructure::Flat {
            rate: 0.15,
            limit: None,
        },
    },
    ProvincialProgram {
        province: "Nova Scotia",
        code: "NSRITC",
        name: "NS R&D Tax Credit",
        refundable: true,
        structure: CreditStructure::Flat {
            rate: 0.15,
            limit: None,
        },
    },
    ProvincialProgram {
        province: "Newfoundland",
        code: "NLRITC",
        name: "NL R&D Tax Credit",
        refundable: true,
        structure: CreditStructure::Flat {
            rate: 0.15,
            limit: None,
        },
    },
    ProvincialProgram {
        province: "Yukon",
        code: "YRITC",
        name: "Yukon R&D Tax Credit",
        refundable: true,
        structure: CreditStructure::Flat {
            rate: 0.15,
            limit: None,
        },
    },
];

/// Jurisdictions confirmed to have no SR&ED credit program.
pub static NO_PROGRAM_PROVINCES: &[&str] = &["PEI", "NWT", "Nunavut"];

const NO_PROGRAM_NOTE: &str = "No provincial SR&ED credit";

/// Programs offered in a province, in table order.
pub fn programs_for(province: &str) -> Vec<&'static ProvincialProgram> {
    PROVINCIAL_PROGRAMS
        .iter()
        .filter(|p| p.province == province)
        .collect()
}

/// Tiered federal ITC on qualified expenditures.
pub fn federal_itc(qualified: f64) -> f64 {
    if qualified <= ITC_CCPC_ENHANCED_LIMIT {
        (qualified * ITC_CCPC_ENHANCED_RATE).round()
    } else {
        let enhanced = (ITC_CCPC_ENHANCED_LIMIT * ITC_CCPC_ENHANCED_RATE).round();
        let base = ((qualified - ITC_CCPC_ENHANCED_LIMIT) * ITC_CCPC_BASE_RATE).round();
        enhanced + base
    }
}

/// Full credit estimate on the corrected expenditures, with the flat
/// enhanced-rate as-filed figure for comparison.
pub fn estimate(client: &ClientProfile, expenditures: &ExpenditureComparison) -> ItcEstimate {
    let qualified = expenditures.corrected.total;
    let federal = federal_itc(qualified);

    let programs = programs_for(&client.province);
    let provincial: Vec<ProvincialCreditLine> = programs
        .iter()
        .map(|program| ProvincialCreditLine {
            code: program.code.to_string(),
            name: program.name.to_string(),
            amount: program.structure.amount(qualified),
            refundable: program.refundable,
        })
        .collect();

    let provincial_total: f64 = provincial.iter().map(|c| c.amount).sum();
    let provincial_refundable: f64 = provincial
        .iter()
        .filter(|c| c.refundable)
        .map(|c| c.amount)
        .sum();

    let provincial_note = if NO_PROGRAM_PROVINCES.contains(&client.province.as_str()) {
        Some(NO_PROGRAM_NOTE.to_string())
    } else {
        None
    };

    ItcEstimate {
        qualified_expenditures: qualified,
        capital_under_threshold: client.taxable_capital < TAXABLE_CAPITAL_PHASEOUT_LOW,
        income_under_threshold: client.taxable_income_prior_year < TAXABLE_INCOME_PHASEOUT_LOW,
        federal,
        provincial,
        provincial_note,
        provincial_total,
        provincial_refundable,
        total_credits: federal + provincial_total,
        // The federal ITC is fully refundable for a CCPC's current
        // expenditures.
        total_refundable: federal + provincial_refundable,
        as_filed_federal: (expenditures.as_filed.total * ITC_CCPC_ENHANCED_RATE).round(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim::models::ExpenditureTotals;

    fn comparison(as_filed_total: f64, corrected_total: f64) -> ExpenditureComparison {
        ExpenditureComparison {
            as_filed: ExpenditureTotals {
                total: as_filed_total,
                ..Default::default()
            },
            corrected: ExpenditureTotals {
                total: corrected_total,
                ..Default::default()
            },
        }
    }

    fn client(province: &str) -> ClientProfile {
        let mut client = ClientProfile::default();
        client.province = province.to_string();
        client.taxable_capital = 4_000_000.0;
        client.taxable_income_prior_year = 350_000.0;
        client
    }

    #[test]
    fn test_federal_itc_below_enhanced_limit() {
        assert_eq!(federal_itc(500_000.0), 175_000.0);
        assert_eq!(federal_itc(6_000_000.0), 2_100_000.0);
    }

    #[test]
    fn test_federal_itc_tiers_above_limit() {
        // 6M x 35% + 2M x 15%
        assert_eq!(federal_itc(8_000_000.0), 2_100_000.0 + 300_000.0);
    }

    #[test]
    fn test_flat_credit_with_limit() {
        let structure = CreditStructure::Flat {
            rate: 0.08,
            limit: Some(3_000_000.0),
        };
        assert_eq!(structure.amount(500_000.0), 40_000.0);
        assert_eq!(structure.amount(5_000_000.0), 240_000.0);
    }

    #[test]
    fn test_two_tier_credit() {
        let structure = CreditStructure::TwoTier {
            rate_first: 0.30,
            rate_above: 0.20,
            threshold: 1_000_000.0,
        };
        assert_eq!(structure.amount(800_000.0), 240_000.0);
        // 1M x 30% + 500k x 20%
        assert_eq!(structure.amount(1_500_000.0), 400_000.0);
    }

    #[test]
    fn test_base_incremental_credit() {
        let structure = CreditStructure::BaseIncremental {
            rate_base: 0.08,
            rate_incremental: 0.20,
            incremental_limit: 4_000_000.0,
        };
        // 5M x 8% + 4M x 20%
        assert_eq!(structure.amount(5_000_000.0), 400_000.0 + 800_000.0);
        // Under the limit the incremental rate covers everything.
        assert_eq!(structure.amount(1_000_000.0), 80_000.0 + 200_000.0);
    }

    #[test]
    fn test_ontario_has_two_programs() {
        let estimate = estimate(&client("Ontario"), &comparison(600_000.0, 500_000.0));
        assert_eq!(estimate.provincial.len(), 2);
        assert_eq!(estimate.provincial[0].code, "OITC");
        assert_eq!(estimate.provincial[0].amount, 40_000.0);
        assert!(estimate.provincial[0].refundable);
        assert_eq!(estimate.provincial[1].code, "ORDTC");
        assert_eq!(estimate.provincial[1].amount, 17_500.0);
        assert!(!estimate.provincial[1].refundable);
        assert_eq!(estimate.provincial_total, 57_500.0);
        assert_eq!(estimate.provincial_refundable, 40_000.0);
        assert_eq!(estimate.federal, 175_000.0);
        assert_eq!(estimate.total_credits, 232_500.0);
        assert_eq!(estimate.total_refundable, 215_000.0);
        assert_eq!(estimate.as_filed_federal, 210_000.0);
        assert!(estimate.provincial_note.is_none());
    }

    #[test]
    fn test_no_program_province_gets_note() {
        let estimate = estimate(&client("Nunavut"), &comparison(100_000.0, 100_000.0));
        assert!(estimate.provincial.is_empty());
        assert_eq!(
            estimate.provincial_note.as_deref(),
            Some("No provincial SR&ED credit")
        );
        assert_eq!(estimate.total_credits, estimate.federal);
    }

    #[test]
    fn test_unknown_province_yields_no_credits_and_no_note() {
        let estimate = estimate(&client("Atlantis"), &comparison(100_000.0, 100_000.0));
        assert!(estimate.provincial.is_empty());
        assert!(estimate.provincial_note.is_none());
    }

    #[test]
    fn test_phase_out_thresholds_are_strict() {
        let mut profile = client("Ontario");
        profile.taxable_capital = 15_000_000.0;
        profile.taxable_income_prior_year = 499_999.0;
        let estimate = estimate(&profile, &comparison(0.0, 0.0));
        assert!(!estimate.capital_under_threshold);
        assert!(estimate.income_under_threshold);
    }

    #[test]
    fn test_saskatchewan_and_manitoba_estimate_non_refundable() {
        let sk = estimate(&client("Saskatchewan"), &comparison(200_000.0, 200_000.0));
        assert!(!sk.provincial[0].refundable);
        let mb = estimate(&client("Manitoba"), &comparison(200_000.0, 200_000.0));
        assert!(!mb.provincial[0].refundable);
        assert_eq!(mb.provincial[0].amount, 30_000.0);
    }
}
