//! Output reporters for scan results
//!
//! Supports three output formats:
//! - `text` - formatted report suitable for filing or printing
//! - `json` - machine-readable JSON
//! - `csv` - findings table for spreadsheet triage

mod csv;
mod json;
mod text;

use crate::claim::models::ClaimReport;
use crate::inspection::models::ScanResult;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(anyhow!(
                "Unknown format '{}'. Valid formats: text, json, csv",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Render an inspection scan result in the specified format
pub fn render_inspection(result: &ScanResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render_inspection(result),
        OutputFormat::Json => json::render_inspection(result),
        OutputFormat::Csv => csv::render_inspection(result),
    }
}

/// Render a claim readiness report in the specified format
pub fn render_claim(report: &ClaimReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render_claim(report),
        OutputFormat::Json => json::render_claim(report),
        OutputFormat::Csv => csv::render_claim(report),
    }
}

/// Get the recommended file extension for a format
pub fn file_extension(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Text => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Csv => "csv",
    }
}
