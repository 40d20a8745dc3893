//! `apply`: switch keymap and optionally store the NumLock preference.

use clap::Args;
use tracing::info;

use crate::cli::common::CliResult;
use crate::coordinator::AppContext;
use crate::error::SettingsError;
use crate::keymap::{enumerate_keymaps, locate_keymap};
use crate::launcher::KeymapLauncher;
use crate::store::ConfigStore;

/// Switch to a keymap without opening the window
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Keymap name (case-insensitive)
    #[arg(value_name = "KEYMAP")]
    keymap: String,

    /// Store whether NumLock is enabled on login
    #[arg(long, value_name = "BOOL")]
    num_lock: Option<bool>,
}

impl ApplyArgs {
    /// Execute apply command
    pub fn execute<S: ConfigStore, L: KeymapLauncher>(
        &self,
        ctx: &AppContext<S, L>,
    ) -> CliResult<()> {
        let keymap = resolve_keymap(ctx, &self.keymap)?;

        ctx.launcher.launch(&keymap)?;
        println!("Switching keymap to {keymap}");

        if let Some(enabled) = self.num_lock {
            ctx.write_num_lock(enabled)?;
            println!(
                "NumLock on login {}",
                if enabled { "enabled" } else { "disabled" }
            );
        }

        info!("Applied keymap {keymap} from command line");
        Ok(())
    }
}

/// Maps a requested name onto the spelling of an installed keymap.
fn resolve_keymap<S: ConfigStore, L: KeymapLauncher>(
    ctx: &AppContext<S, L>,
    requested: &str,
) -> Result<String, SettingsError> {
    if requested.is_empty() {
        return Err(SettingsError::EmptySelection);
    }

    let names = enumerate_keymaps(&ctx.paths.keymaps_dir)?;
    locate_keymap(&names, requested)
        .map(|i| names[i].clone())
        .ok_or_else(|| SettingsError::UnknownKeymap(requested.to_string()))
}
