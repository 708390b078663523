//! Static CRA rule catalogs: the five-question eligibility test, the audit
//! rule reference entries, and the T661 form part inventory.
//!
//! These are reference data, not evaluation logic; the scoring and issue
//! modules point back at them so report consumers can cite sources.

/// One question of the five-question eligibility test
#[derive(Debug, Clone, Copy)]
pub struct EligibilityQuestion {
    pub id: &'static str,
    /// Field key inside a project's `five_question_test` block
    pub key: &'static str,
    pub question: &'static str,
    pub source: &'static str,
}

/// The Northwest Hydraulic five-question eligibility test, in order.
pub static FIVE_QUESTIONS: &[EligibilityQuestion] = &[
    EligibilityQuestion {
        id: "Q1",
        key: "q1_uncertainty",
        question: "Was there scientific or technological uncertainty that could not be resolved by standard practice?",
        source: "Northwest Hydraulic Consultants Ltd. v. The Queen (1998); CRA Guidelines on Eligibility (2021), Section 2.1",
    },
    EligibilityQuestion {
        id: "Q2",
        key: "q2_hypothesis",
        question: "Did the effort involve formulating hypotheses specifically aimed at reducing or eliminating that uncertainty?",
        source: "CRA Guidelines on Eligibility (2021), Section 2.2",
    },
    EligibilityQuestion {
        id: "Q3",
        key: "q3_systematic",
        question: "Was the overall approach adopted consistent with a systematic investigation or search, including formulating and testing hypotheses by means of experiment or analysis?",
        source: "CRA Guidelines on Eligibility (2021), Section 2.3",
    },
    EligibilityQuestion {
        id: "Q4",
        key: "q4_advancement",
        question: "Was the overall approach undertaken for the purpose of achieving a scientific or technological advancement?",
        source: "CRA Guidelines on Eligibility (2021), Section 2.4",
    },
    EligibilityQuestion {
        id: "Q5",
        key: "q5_record",
        question: "Was a record of the hypotheses tested and results kept as the work progressed?",
        source: "CRA Guidelines on Eligibility (2021), Section 6",
    },
];

/// One audit-rule reference entry
#[derive(Debug, Clone, Copy)]
pub struct CraRule {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub source: &'static str,
}

/// CRA rule reference entries R01-R17, in id order.
pub static CRA_RULES: &[CraRule] = &[
    CraRule {
        id: "R01",
        title: "Five-Question Eligibility Test",
        description: "All five questions must be answered YES for project to be eligible.",
        source: "Northwest Hydraulic (1998), CRA Guidelines on Eligibility (2021)",
    },
    CraRule {
        id: "R02",
        title: "Technological Uncertainty vs Technical Problem",
        description: "Technological uncertainty (solution/method unknown) differs from technical problems (existing knowledge sufficient). Complexity, novelty of application, or business value do not qualify.",
        source: "CRA Guidelines on Eligibility, Section 2.1.1",
    },
    CraRule {
        id: "R03",
        title: "Materials Eligibility",
        description: "Materials must be consumed or transformed by SR&ED to be eligible.",
        source: "ITA 37(1)(a)(ii), CRA Materials Policy (2024-01-23), Section 3.2",
    },
    CraRule {
        id: "R04",
        title: "Contract SR&ED Specification",
        description: "Contract must specify that work is SR&ED for expenditure to qualify.",
        source: "CRA Contract Expenditures for SR&ED Policy, Section 4.1",
    },
    CraRule {
        id: "R05",
        title: "Arm's-Length Contract ITC Rate",
        description: "Arm's-length contracts: 100% deductible, 80% qualifies for ITC.",
        source: "ITA 127(9), definition of qualified expenditure",
    },
    CraRule {
        id: "R06",
        title: "Specified Employee Salary Cap",
        description: "Specified employee (10%+ shareholder): salary capped for PPA at lesser of 75% salary or 2.5x YMPE.",
        source: "ITA 37(9.1), CRA Salary/Wages Policy (2025-01-28)",
    },
    CraRule {
        id: "R07",
        title: "PPA Cap Calculation",
        description: "PPA cap for specified employees: lesser of 75% of salary or 2.5x YMPE.",
        source: "ITA 37(9.1)(a)",
    },
    CraRule {
        id: "R08",
        title: "Proxy Method Rate",
        description: "Proxy method: 55% of salary base, not deductible but earns ITC.",
        source: "ITA 37(8)",
    },
    CraRule {
        id: "R09",
        title: "Filing Deadline",
        description: "Filing deadline: 18 months from fiscal year end (absolute, no extensions).",
        source: "ITA 37(11)",
    },
    CraRule {
        id: "R10",
        title: "Preparer Disclosure",
        description: "Part 9 preparer disclosure mandatory. $1,000 penalty if missing or inaccurate.",
        source: "ITA 162(5.2)",
    },
    CraRule {
        id: "R11",
        title: "Contingency Fee Preparer Risk",
        description: "Contingency fee preparers face elevated CRA scrutiny and higher audit rates.",
        source: "CRA public warnings (April 2022, October 2022)",
    },
    CraRule {
        id: "R12",
        title: "Contemporaneous Documentation",
        description: "Contemporaneous documentation is CRA's primary review focus. While not a statutory requirement (Abeilles v. The Queen, 2014 TCC 313), gaps trigger CRA requests.",
        source: "CRA Guidelines on Eligibility, Section 6",
    },
    CraRule {
        id: "R13",
        title: "CCPC Enhanced ITC Rate",
        description: "CCPC enhanced ITC rate: 35% on first $6M of qualified expenditures.",
        source: "ITA 127.1(2), Budget 2025",
    },
    CraRule {
        id: "R14",
        title: "Provincial Credits as Government Assistance",
        description: "Provincial credits reduce federal qualified expenditure base (treated as government assistance).",
        source: "ITA 127(9), definition of government assistance",
    },
    CraRule {
        id: "R15",
        title: "Narrative Word Limits",
        description: "Line 242 limit 350 words, Line 244 limit 700 words, Line 246 limit 350 words.",
        source: "T661 form instructions",
    },
    CraRule {
        id: "R16",
        title: "Salary Payment Deadline",
        description: "Salaries must be paid within 180 days of fiscal year end to be eligible.",
        source: "ITA 78(4)",
    },
    CraRule {
        id: "R17",
        title: "Capital Expenditures Restored",
        description: "Capital expenditures restored for property acquired after Dec 15, 2024.",
        source: "Budget 2025, effective date provision",
    },
];

/// Lookup by rule id, e.g. "R06".
pub fn rule(id: &str) -> Option<&'static CraRule> {
    CRA_RULES.iter().find(|r| r.id == id)
}

/// One part of Form T661
#[derive(Debug, Clone, Copy)]
pub struct T661Part {
    /// Key inside the form's `parts_status` map
    pub key: &'static str,
    pub number: u8,
    pub title: &'static str,
    pub description: &'static str,
}

/// All ten parts of Form T661, in form order.
pub static T661_PARTS: &[T661Part] = &[
    T661Part {
        key: "part_1_general_info",
        number: 1,
        title: "General Information",
        description: "Corporation name, business number, tax year, province, first-time claimant status.",
    },
    T661Part {
        key: "part_2_project_info",
        number: 2,
        title: "Project Information",
        description: "Per-project narratives (Lines 242, 244, 246), five-question test results, personnel evidence.",
    },
    T661Part {
        key: "part_3_expenditures",
        number: 3,
        title: "Expenditure Calculation",
        description: "Salaries (Line 300), materials (Line 360), contracts (Line 370), total SR&ED expenditures.",
    },
    T661Part {
        key: "part_4_qualified_expenditures",
        number: 4,
        title: "Qualified Expenditures for ITC",
        description: "Calculation of expenditures that qualify for Investment Tax Credit.",
    },
    T661Part {
        key: "part_5_ppa",
        number: 5,
        title: "Prescribed Proxy Amount (PPA)",
        description: "Proxy method calculation: 55% of eligible salary base.",
    },
    T661Part {
        key: "part_6_per_project_breakdown",
        number: 6,
        title: "Per-Project Breakdown",
        description: "Expenditure allocation by project.",
    },
    T661Part {
        key: "part_7_statistical_info",
        number: 7,
        title: "Statistical Information",
        description: "R&D personnel count, total SR&ED expenditures, industry classification.",
    },
    T661Part {
        key: "part_8_checklist",
        number: 8,
        title: "Supporting Evidence Checklist",
        description: "Evidence checklist (Lines 270-282): lab notebooks, planning docs, test data, etc.",
    },
    T661Part {
        key: "part_9_preparer",
        number: 9,
        title: "Preparer Disclosure",
        description: "Third-party preparer information, billing arrangement, fee percentage.",
    },
    T661Part {
        key: "part_10_certification",
        number: 10,
        title: "Certification",
        description: "Officer certification that information is correct and complete.",
    },
];

/// Evidence checklist line keys and display labels (T661 Lines 270-282).
pub static CHECKLIST_LINES: &[(&str, &str)] = &[
    ("line_270_lab_notebooks", "270 — Lab notebooks"),
    ("line_272_project_planning_docs", "272 — Project planning docs"),
    ("line_274_design_docs", "274 — Design/system architecture"),
    ("line_276_test_protocols_data", "276 — Test protocols/data"),
    ("line_278_photographs_videos", "278 — Photos/videos"),
    ("line_280_contracts_invoices", "280 — Contracts/invoices"),
    ("line_282_other", "282 — Other records"),
];
