//! `show`: print the active keymap and the NumLock preference.

use clap::Args;
use serde::Serialize;

use crate::cli::common::{CliError, CliResult};
use crate::coordinator::AppContext;
use crate::keymap::read_current_keymap;
use crate::launcher::KeymapLauncher;
use crate::store::ConfigStore;

/// Show the active keymap and the NumLock preference
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize, Debug)]
struct ShowOutput {
    keymap: String,
    num_lock: bool,
}

impl ShowArgs {
    /// Execute show command
    pub fn execute<S: ConfigStore, L: KeymapLauncher>(
        &self,
        ctx: &AppContext<S, L>,
    ) -> CliResult<()> {
        let output = ShowOutput {
            keymap: read_current_keymap(&ctx.paths.status_file)?,
            num_lock: ctx.read_num_lock(),
        };

        if self.json {
            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| CliError::io(format!("Failed to serialize settings to JSON: {e}")))?;
            println!("{json}");
        } else {
            println!("Keymap:            {}", output.keymap);
            println!(
                "NumLock on login:  {}",
                if output.num_lock { "enabled" } else { "disabled" }
            );
        }

        Ok(())
    }
}
