//! Shared CLI error type and exit codes.

use std::fmt;

use crate::error::SettingsError;

/// Process exit codes used by headless commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command succeeded
    Success = 0,
    /// Invalid input or unknown keymap
    ValidationError = 1,
    /// Filesystem, store or process failure
    IoError = 2,
}

/// Error returned by CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Message printed to stderr
    pub message: String,
    /// Exit code the process ends with
    pub exit_code: ExitCode,
}

impl CliError {
    /// Invalid input.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit_code: ExitCode::ValidationError,
        }
    }

    /// Filesystem, store or process failure.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit_code: ExitCode::IoError,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

impl From<SettingsError> for CliError {
    fn from(e: SettingsError) -> Self {
        match e {
            SettingsError::EmptySelection | SettingsError::UnknownKeymap(_) => {
                Self::validation(e.to_string())
            }
            _ => Self::io(e.to_string()),
        }
    }
}

/// Result alias for CLI commands.
pub type CliResult<T> = Result<T, CliError>;
