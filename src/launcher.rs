//! Keymap tool launching.
//!
//! Switching keymaps is done by an external tool that takes the keymap name
//! as its only argument. The tool is started and left to run: its exit status
//! is never observed, so a tool that starts but then fails goes unnoticed.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::info;

use crate::error::{SettingsError, SettingsResult};

/// Something that can switch the active keymap.
pub trait KeymapLauncher {
    /// Starts switching to `keymap` without waiting for completion.
    fn launch(&self, keymap: &str) -> SettingsResult<()>;
}

/// Launches the keymap tool as a child process.
#[derive(Debug, Clone)]
pub struct ProcessLauncher {
    tool: PathBuf,
}

impl ProcessLauncher {
    /// Creates a launcher for the tool at `tool`.
    pub fn new(tool: impl Into<PathBuf>) -> Self {
        Self { tool: tool.into() }
    }

    /// Path of the tool.
    pub fn tool(&self) -> &Path {
        &self.tool
    }
}

impl KeymapLauncher for ProcessLauncher {
    fn launch(&self, keymap: &str) -> SettingsResult<()> {
        let child = Command::new(&self.tool)
            .arg(keymap)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| SettingsError::LaunchFailed {
                tool: self.tool.clone(),
                source,
            })?;

        info!(
            "Launched {} {keymap} (pid {})",
            self.tool.display(),
            child.id()
        );
        // Dropping the handle neither waits for nor kills the child.
        drop(child);
        Ok(())
    }
}

/// Launcher that only records the requested keymaps.
#[derive(Debug, Default)]
pub struct RecordingLauncher {
    launched: RefCell<Vec<String>>,
}

impl RecordingLauncher {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keymaps requested so far, in order.
    pub fn launched(&self) -> Vec<String> {
        self.launched.borrow().clone()
    }
}

impl KeymapLauncher for RecordingLauncher {
    fn launch(&self, keymap: &str) -> SettingsResult<()> {
        info!("Recorded keymap switch to {keymap}");
        self.launched.borrow_mut().push(keymap.to_string());
        Ok(())
    }
}
