//! Init command - write a starter config and data directory skeleton

use anyhow::{Context, Result};
use console::style;
use std::path::Path;

use crate::config::CONFIG_FILE;

const STARTER_CONFIG: &str = r#"# Auditready configuration
# All keys are optional; command-line flags override these values.

[data]
# Where `auditready inspect` looks for the practice package
practice_dir = "data/practice"
# Where `auditready claim` looks for the claim package
claim_dir = "data/claim"

[output]
# Default report format: text, json, csv
format = "text"

[ci]
# Exit 1 when findings at or above this severity exist
# (inspect: critical/warning/info, claim: high/medium/low)
# fail_on = "critical"
"#;

/// Run the init command
pub fn run() -> Result<()> {
    println!("\nInitializing auditready\n");

    let config_path = Path::new(CONFIG_FILE);
    if config_path.exists() {
        println!(
            "{} {} already exists, leaving it untouched",
            style("-").dim(),
            style(CONFIG_FILE).cyan()
        );
    } else {
        std::fs::write(config_path, STARTER_CONFIG)
            .with_context(|| format!("Failed to write {}", CONFIG_FILE))?;
        println!("{} Created {}", style("+").green(), style(CONFIG_FILE).cyan());
    }

    for dir in [
        "data/practice/documents/firm_level",
        "data/practice/documents/engagement_files",
        "data/claim",
    ] {
        let path = Path::new(dir);
        if path.is_dir() {
            println!(
                "{} {} already exists",
                style("-").dim(),
                style(dir).cyan()
            );
        } else {
            std::fs::create_dir_all(path)
                .with_context(|| format!("Failed to create {}", dir))?;
            println!("{} Created {}", style("+").green(), style(dir).cyan());
        }
    }

    println!("\nNext steps:");
    println!(
        "  Place firm_profile.json and document JSON under {}",
        style("data/practice/").cyan()
    );
    println!(
        "  Place the five claim package files under {}",
        style("data/claim/").cyan()
    );
    println!(
        "  Then run {} or {}",
        style("auditready inspect").cyan(),
        style("auditready claim").cyan()
    );

    Ok(())
}
