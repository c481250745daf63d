//! CLI argument parsing using clap derive API
//!
//! Purely declarative. Scan settings come from `fixbug.toml` and
//! `FIXBUG_*` environment variables, not from flags.

use std::path::PathBuf;

use clap::Parser;

/// fixbug -- list the bugs fixed by a set of Oracle patch archives.
///
/// Scans the configured directory for patch ZIP files, reads every
/// `inventory.xml` inside them in version order, and writes one
/// de-duplicated bug report.
#[derive(Parser, Debug)]
#[command(name = "fixbug", version, about, long_about = None)]
pub struct Cli {
    /// Output file path (default: Fixed_Bug_For_<version>_<YYYYMMDD>.txt).
    pub output: Option<PathBuf>,
}
