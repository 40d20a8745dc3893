//! Headless commands.
//!
//! Scriptable access to the same operations as the settings window, for
//! automation and tests.

pub mod apply;
pub mod common;
pub mod config;
pub mod list;
pub mod show;

use clap::Args;
use std::path::PathBuf;

use crate::config::PathConfig;

pub use apply::ApplyArgs;
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use list::ListArgs;
pub use show::ShowArgs;

/// Path overrides shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct PathArgs {
    /// JSON status document exposing the active keymap
    #[arg(long, value_name = "FILE", global = true)]
    pub status_file: Option<PathBuf>,

    /// Directory holding <name>.json keymap files
    #[arg(long, value_name = "DIR", global = true)]
    pub keymaps_dir: Option<PathBuf>,

    /// Tool invoked with the chosen keymap name
    #[arg(long, value_name = "PATH", global = true)]
    pub keymap_tool: Option<PathBuf>,

    /// Directory of the settings store
    #[arg(long, value_name = "DIR", global = true)]
    pub store_dir: Option<PathBuf>,
}

impl PathArgs {
    /// Overrides configured paths with the ones given on the command line.
    pub fn apply_to(&self, paths: &mut PathConfig) {
        if let Some(path) = &self.status_file {
            paths.status_file.clone_from(path);
        }
        if let Some(path) = &self.keymaps_dir {
            paths.keymaps_dir.clone_from(path);
        }
        if let Some(path) = &self.keymap_tool {
            paths.keymap_tool.clone_from(path);
        }
        if let Some(path) = &self.store_dir {
            paths.store_dir = Some(path.clone());
        }
    }
}
