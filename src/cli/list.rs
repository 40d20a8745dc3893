//! `list`: print the installed keymaps.

use clap::Args;
use serde::Serialize;
use tracing::warn;

use crate::cli::common::{CliError, CliResult};
use crate::coordinator::AppContext;
use crate::keymap::{enumerate_keymaps, locate_keymap, read_current_keymap};
use crate::launcher::KeymapLauncher;
use crate::store::ConfigStore;

/// List installed keymaps
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize, Debug, PartialEq, Eq)]
struct KeymapEntry {
    name: String,
    current: bool,
}

impl ListArgs {
    /// Execute list command
    pub fn execute<S: ConfigStore, L: KeymapLauncher>(
        &self,
        ctx: &AppContext<S, L>,
    ) -> CliResult<()> {
        let names = enumerate_keymaps(&ctx.paths.keymaps_dir)?;

        // Listing still works when the status document is unavailable.
        let current = match read_current_keymap(&ctx.paths.status_file) {
            Ok(current) => locate_keymap(&names, &current),
            Err(e) => {
                warn!("{e}");
                None
            }
        };

        let entries = entries(names, current);
        if self.json {
            let json = serde_json::to_string_pretty(&entries)
                .map_err(|e| CliError::io(format!("Failed to serialize keymaps to JSON: {e}")))?;
            println!("{json}");
        } else {
            for entry in &entries {
                let marker = if entry.current { "*" } else { " " };
                println!("{marker} {}", entry.name);
            }
        }

        Ok(())
    }
}

fn entries(names: Vec<String>, current: Option<usize>) -> Vec<KeymapEntry> {
    names
        .into_iter()
        .enumerate()
        .map(|(i, name)| KeymapEntry {
            name,
            current: Some(i) == current,
        })
        .collect()
}
