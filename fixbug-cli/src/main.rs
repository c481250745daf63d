//! fixbug -- consolidate the fixed-bug lists of Oracle patch archives.
//!
//! Loads `fixbug.toml` (or the file named by `FIXBUG_CONFIG`), scans the
//! configured directory once, and prints the written report path.

mod cli;
mod error;
mod logging;

use std::io::Write;

use clap::Parser;
use colored::Colorize;

use fixbug_core::config::FixbugConfig;
use fixbug_inventory::{InventoryConfig, RunSummary};

use cli::Cli;
use error::CliError;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = FixbugConfig::discover()?;
    logging::init_tracing(&config.general).map_err(|e| CliError::Config(e.to_string()))?;

    tracing::debug!(dir = %config.scan.dir, "fixbug starting");

    let inventory_config = InventoryConfig::from_core(&config.scan);
    match fixbug_inventory::run(inventory_config, cli.output.as_deref())? {
        Some(summary) => print_summary(&summary)?,
        None => {
            eprintln!(
                "{} no patch archives with {} found in {}",
                "warning:".yellow().bold(),
                config.scan.descriptor_name,
                config.scan.dir
            );
        }
    }

    Ok(())
}

fn print_summary(summary: &RunSummary) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{}", summary.output_path.display())?;

    eprintln!(
        "{} {} patches, {} unique bugs",
        "done:".green().bold(),
        summary.descriptors_emitted,
        summary.unique_bugs
    );
    if summary.archives_skipped > 0 {
        eprintln!(
            "{} {} of {} archives could not be read",
            "warning:".yellow().bold(),
            summary.archives_skipped,
            summary.archives_scanned
        );
    }
    Ok(())
}
