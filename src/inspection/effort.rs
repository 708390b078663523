//! Fix-time estimate parsing
//!
//! Findings carry free-text effort estimates ("2 hours", "30 minutes
//! (documentation)"). Only integer hour and minute tokens are recognized;
//! anything else contributes zero to the aggregate.

use std::sync::OnceLock;

use regex::Regex;

use crate::inspection::models::Finding;

static HOUR_TOKEN: OnceLock<Regex> = OnceLock::new();
static MINUTE_TOKEN: OnceLock<Regex> = OnceLock::new();

fn hour_token() -> &'static Regex {
    HOUR_TOKEN.get_or_init(|| Regex::new(r"(\d+)\s*hour").unwrap())
}

fn minute_token() -> &'static Regex {
    MINUTE_TOKEN.get_or_init(|| Regex::new(r"(\d+)\s*min").unwrap())
}

/// Parse one estimate into fractional hours. Unparseable text yields 0.
pub fn parse_fix_time(text: &str) -> f64 {
    let text = text.to_lowercase();
    let mut total = 0.0;
    if let Some(caps) = hour_token().captures(&text) {
        total += caps[1].parse::<f64>().unwrap_or(0.0);
    }
    if let Some(caps) = minute_token().captures(&text) {
        total += caps[1].parse::<f64>().unwrap_or(0.0) / 60.0;
    }
    total
}

/// Sum estimated hours across findings, rounded to one decimal.
pub fn total_fix_hours(findings: &[Finding]) -> f64 {
    let total: f64 = findings
        .iter()
        .map(|f| parse_fix_time(&f.estimated_fix_time))
        .sum();
    (total * 10.0).round() / 10.0
}
