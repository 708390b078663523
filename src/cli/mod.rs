//! CLI command definitions and handlers

mod claim;
mod init;
mod inspect;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use console::style;
use std::path::{Path, PathBuf};

use crate::config;

/// Parse an ISO calendar date argument
fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("'{}' is not a valid date (expected YYYY-MM-DD)", s))
}

/// Auditready - compliance document readiness scanning
#[derive(Parser, Debug)]
#[command(name = "auditready")]
#[command(
    version,
    about = "Score compliance document packages against practice-inspection and SR&ED claim rules",
    long_about = "Auditready evaluates JSON document packages against two hardcoded rulebooks: \
CPA practice-inspection readiness (firm-level quality management plus engagement files) and \
SR&ED claim readiness (T661 projects, expenditure schedules, and documentation logs).\n\n\
Every scan is local and deterministic. Rule thresholds are compiled in, and date-sensitive \
checks run against an explicit --as-of date rather than the wall clock.",
    after_help = "\
Examples:
  auditready inspect                       Scan data/practice and print the report
  auditready inspect --format json         JSON output for scripting
  auditready claim --fail-on high          Exit 1 when HIGH issues exist (CI mode)
  auditready claim --as-of 2025-01-15      Evaluate deadlines against a fixed date
  auditready init                          Write a starter auditready.toml"
)]
pub struct Cli {
    /// Config file path (default: ./auditready.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the CPA practice-inspection readiness scan
    #[command(after_help = "\
Examples:
  auditready inspect                                 Scan data/practice
  auditready inspect --data-dir /path/to/package     Scan a specific package
  auditready inspect --format json -o report.json    Write the JSON report to a file
  auditready inspect --severity warning              Hide INFO findings from listings
  auditready inspect --fail-on critical              Exit 1 on critical findings (CI mode)
  auditready inspect --as-of 2024-06-01              Fix the evaluation date")]
    Inspect {
        /// Directory holding the practice document package
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Output format: text, json, csv
        #[arg(long, short = 'f', value_parser = ["text", "json", "csv"])]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Minimum severity to include in findings listings
        #[arg(long, value_parser = ["critical", "warning", "info"])]
        severity: Option<String>,

        /// Exit with code 1 if findings at this severity or higher exist
        #[arg(long, value_parser = ["critical", "warning", "info"])]
        fail_on: Option<String>,

        /// Evaluate date-sensitive rules against this date instead of today
        #[arg(long, value_parser = parse_date, value_name = "YYYY-MM-DD")]
        as_of: Option<NaiveDate>,
    },

    /// Run the SR&ED claim readiness scan
    #[command(after_help = "\
Examples:
  auditready claim                                   Scan data/claim
  auditready claim --data-dir /path/to/package       Scan a specific package
  auditready claim --format csv -o issues.csv        Write the issue list as CSV
  auditready claim --fail-on high                    Exit 1 on HIGH issues (CI mode)
  auditready claim --as-of 2025-01-15                Fix the evaluation date")]
    Claim {
        /// Directory holding the claim document package
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Output format: text, json, csv
        #[arg(long, short = 'f', value_parser = ["text", "json", "csv"])]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Exit with code 1 if issues at this severity or higher exist
        #[arg(long, value_parser = ["high", "medium", "low"])]
        fail_on: Option<String>,

        /// Evaluate deadlines against this date instead of today
        #[arg(long, value_parser = parse_date, value_name = "YYYY-MM-DD")]
        as_of: Option<NaiveDate>,
    },

    /// Write a starter auditready.toml and data directory skeleton
    Init,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Inspect {
            data_dir,
            format,
            output,
            severity,
            fail_on,
            as_of,
        } => {
            let config = config::load_config(cli.config.as_deref());
            inspect::run(data_dir, format, output, severity, fail_on, as_of, &config)
        }

        Commands::Claim {
            data_dir,
            format,
            output,
            fail_on,
            as_of,
        } => {
            let config = config::load_config(cli.config.as_deref());
            claim::run(data_dir, format, output, fail_on, as_of, &config)
        }

        Commands::Init => init::run(),
    }
}

/// Write the rendered report to `path`, or print it to stdout.
pub(crate) fn write_output(rendered: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            // Confirmation goes to stderr so piped stdout stays machine-readable
            eprintln!(
                "{} Report written to {}",
                style("+").green(),
                style(path.display()).cyan()
            );
        }
        None => println!("{}", rendered),
    }
    Ok(())
}
