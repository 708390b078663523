//! 2024 tax-year constants used by the claim scoring and ITC math
//!
//! Rates reflect the post-Budget 2025 reforms, effective for expenditures
//! after December 15, 2024.

/// Year's Maximum Pensionable Earnings, 2024
pub const YMPE_2024: f64 = 68_500.0;
/// Specified-employee PPA base cap: 2.5x YMPE
pub const SPECIFIED_EMPLOYEE_PPA_CAP_MULTIPLIER: f64 = 2.5;
/// Specified-employee salary cap: 75% of salary
pub const SPECIFIED_EMPLOYEE_SALARY_PERCENTAGE: f64 = 0.75;

/// CCPC enhanced ITC rate on the first $6M of qualified expenditures
pub const ITC_CCPC_ENHANCED_RATE: f64 = 0.35;
/// Enhanced-rate expenditure limit (up from $3M)
pub const ITC_CCPC_ENHANCED_LIMIT: f64 = 6_000_000.0;
/// Base ITC rate above the enhanced limit
pub const ITC_CCPC_BASE_RATE: f64 = 0.15;

/// Taxable-capital floor below which the full enhanced rate applies
pub const TAXABLE_CAPITAL_PHASEOUT_LOW: f64 = 15_000_000.0;
/// Prior-year taxable-income floor below which the full enhanced rate applies
pub const TAXABLE_INCOME_PHASEOUT_LOW: f64 = 500_000.0;

/// Proxy method overhead rate on the salary base
pub const PROXY_RATE: f64 = 0.55;

/// T661 Part 2 Section B narrative word limits
pub const LINE_242_WORD_LIMIT: usize = 350;
pub const LINE_244_WORD_LIMIT: usize = 700;
pub const LINE_246_WORD_LIMIT: usize = 350;

/// Filing deadline: months from fiscal year end, absolute, no extensions
pub const FILING_DEADLINE_MONTHS: i64 = 18;
