//! Auditready - compliance readiness scanning CLI
//!
//! Evaluates compliance document packages (CPA practice inspection files,
//! SR&ED claim packages) against hardcoded regulatory rules and reports
//! findings, scores, and remediation plans.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use auditready::cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // RUST_LOG wins over --log-level when set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.clone()));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    cli::run(cli)
}
