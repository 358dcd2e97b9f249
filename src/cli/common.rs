//! Shared types and helpers for CLI commands.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::KleError;
use crate::models::Keyboard;
use crate::parser::{parse_kle_file, save_kle_file, to_kle_string};

/// Process exit codes used by every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Input was rejected (bad layout, bad arguments)
    ValidationError = 1,
    /// A file could not be read or written
    IoError = 2,
}

impl ExitCode {
    /// Numeric process exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by a CLI command, carrying its exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Exit code to terminate with
    pub exit_code: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// An I/O failure (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            exit_code: ExitCode::IoError,
            message: message.into(),
        }
    }

    /// A validation failure (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            exit_code: ExitCode::ValidationError,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

impl From<KleError> for CliError {
    fn from(err: KleError) -> Self {
        match err {
            KleError::Io { .. } => Self::io(err.to_string()),
            _ => Self::validation(err.to_string()),
        }
    }
}

/// Result type of CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Loads the user configuration, turning failures into I/O errors.
pub fn load_config() -> CliResult<Config> {
    Config::load().map_err(|e| CliError::io(format!("Failed to load config: {e:#}")))
}

/// Parses a layout file with the given spacing, or the configured default.
pub fn load_layout(path: &Path, spacing: Option<f64>, config: &Config) -> CliResult<Keyboard> {
    let spacing = spacing.unwrap_or(config.geometry.spacing);
    parse_kle_file(path, spacing).map_err(|e| {
        let err = CliError::from(e);
        CliError {
            message: format!("Failed to load layout {}: {}", path.display(), err.message),
            ..err
        }
    })
}

/// Writes a layout to `output`, or to stdout when no path is given.
pub fn write_layout(keyboard: &Keyboard, output: Option<&PathBuf>, pretty: bool) -> CliResult<()> {
    match output {
        Some(path) => {
            save_kle_file(keyboard, path, pretty)?;
            eprintln!("✓ Wrote {} keys to: {}", keyboard.key_count(), path.display());
        }
        None => println!("{}", to_kle_string(keyboard, pretty)?),
    }
    Ok(())
}
