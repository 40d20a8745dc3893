//! Error types for keyboard settings.
//!
//! Failures come in two tiers. Fatal ones mean the environment does not look
//! like what the application was built for (status document missing, active
//! keymap not installed, keymap tool missing) and end the process. The rest
//! are user-correctable: they are shown in a message box and only the
//! triggering action is abandoned.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the settings coordinator and its collaborators.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The status document could not be read.
    #[error("Failed to read keymap status from {}: {source}", path.display())]
    StatusUnreadable {
        /// Path of the status document
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The status document is not valid JSON or not an object.
    #[error("Malformed keymap status in {}: {reason}", path.display())]
    StatusMalformed {
        /// Path of the status document
        path: PathBuf,
        /// What was wrong with it
        reason: String,
    },

    /// The status document has no usable `keymap` field.
    #[error("Keymap status in {} has no \"keymap\" string", path.display())]
    MissingKeymapField {
        /// Path of the status document
        path: PathBuf,
    },

    /// The keymap directory could not be listed.
    #[error("Error on reading mapping file list: {source}")]
    KeymapDirUnreadable {
        /// Directory that was being listed
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The active keymap is not one of the installed keymap files.
    #[error("Current keymap \"{current}\" is not among the installed keymaps")]
    CurrentKeymapNotListed {
        /// Name reported by the status document
        current: String,
    },

    /// Apply was requested with nothing selected.
    #[error("Please select character mapping file.")]
    EmptySelection,

    /// A keymap name given on the command line is not installed.
    #[error("Unknown keymap \"{0}\"")]
    UnknownKeymap(String),

    /// The keymap tool could not be started.
    #[error("Failed to launch {}: {source}", tool.display())]
    LaunchFailed {
        /// Tool that was being started
        tool: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The config store could not persist a value.
    #[error("Failed to write {domain}/{group}/{key}: {reason}")]
    StoreWrite {
        /// Config domain
        domain: String,
        /// Config group
        group: String,
        /// Config key
        key: String,
        /// What went wrong
        reason: String,
    },
}

impl SettingsError {
    /// Returns `true` when the error must end the process.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::StatusUnreadable { .. }
                | Self::StatusMalformed { .. }
                | Self::MissingKeymapField { .. }
                | Self::CurrentKeymapNotListed { .. }
                | Self::LaunchFailed { .. }
        )
    }
}

/// Result alias used across the crate.
pub type SettingsResult<T> = Result<T, SettingsError>;
