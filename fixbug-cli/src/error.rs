//! CLI-specific error types and exit code mapping

use fixbug_core::error::FixbugError;
use fixbug_inventory::InventoryError;

/// CLI-specific error type.
///
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// The report run failed (output file could not be written).
    #[error("{0}")]
    Run(String),

    /// IO error (stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                    |
    /// |------|----------------------------|
    /// | 0    | Success (incl. no archives) |
    /// | 1    | Run / IO error             |
    /// | 2    | Configuration error        |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Run(_) | Self::Io(_) => 1,
        }
    }
}

impl From<FixbugError> for CliError {
    fn from(e: FixbugError) -> Self {
        match e {
            FixbugError::Config(inner) => Self::Config(inner.to_string()),
            other => Self::Run(other.to_string()),
        }
    }
}

impl From<InventoryError> for CliError {
    fn from(e: InventoryError) -> Self {
        FixbugError::from(e).into()
    }
}
