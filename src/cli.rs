//! CLI command implementations for Tessera.

pub(crate) mod play;

use clap::ValueEnum;
use std::error::Error;
use std::fmt;
use std::io::{self, Write};

use tessera::batch::Format;

/// Output format for the `batch` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Bare values, one per line.
    Text,
    /// One JSON object per executed command.
    Json,
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => Self::Text,
            OutputFormat::Json => Self::Json,
        }
    }
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::new(e.to_string())
    }
}

/// Execute the batch command: drive the interpreter over stdin.
///
/// # Errors
///
/// Returns an error when reading stdin or writing stdout/stderr fails.
pub(crate) fn batch(format: OutputFormat) -> Result<(), CliError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let stderr = io::stderr();
    tessera::batch::run(
        stdin.lock(),
        stdout.lock(),
        stderr.lock(),
        format.into(),
    )?;
    stderr.lock().flush()?;
    Ok(())
}
