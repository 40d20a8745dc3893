//! Keyboard Settings - pick the active keymap and the NumLock startup state.
//!
//! Without a subcommand the settings window opens in the terminal.

use anyhow::Result;
use clap::{Parser, Subcommand};
use keyboard_settings::cli::{self, ApplyArgs, ConfigArgs, ListArgs, PathArgs, ShowArgs};
use keyboard_settings::config::Config;
use keyboard_settings::coordinator::AppContext;
use keyboard_settings::launcher::ProcessLauncher;
use keyboard_settings::logging::{self, LogTarget};
use keyboard_settings::store::FileConfigStore;
use keyboard_settings::{app, tui};
use std::process::ExitCode;
use tracing::error;

/// Keyboard Settings - choose the active keymap and NumLock on login
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    paths: PathArgs,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List installed keymaps
    List(ListArgs),
    /// Show the active keymap and the NumLock preference
    Show(ShowArgs),
    /// Switch keymap without opening the window
    Apply(ApplyArgs),
    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    // Load or fall back to default config
    let mut config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config: {e:#}");
        Config::default()
    });
    cli.paths.apply_to(&mut config.paths);

    let store = FileConfigStore::new(config.store_dir()?);
    let launcher = ProcessLauncher::new(config.paths.keymap_tool.clone());
    let paths = config.paths.clone();

    let Some(command) = cli.command else {
        // The window still opens when the log file cannot be set up.
        let logged = Config::config_dir().and_then(|dir| {
            logging::init(cli.verbose, LogTarget::File(dir.join("keyboard-settings.log")))
        });
        if let Err(e) = logged {
            eprintln!("Warning: Logging disabled: {e:#}");
        }
        tui::install_panic_hook();

        let ctx = AppContext::new(paths, store, launcher);
        return app::run_settings_terminal(&ctx, config.ui.theme_mode);
    };

    logging::init(cli.verbose, LogTarget::Stderr)?;
    let ctx = AppContext::new(paths, store, launcher);

    let result = match command {
        Command::List(args) => args.execute(&ctx),
        Command::Show(args) => args.execute(&ctx),
        Command::Apply(args) => args.execute(&ctx),
        Command::Config(args) => args.execute(&cli.paths),
    };

    Ok(match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code(&e)
        }
    })
}

fn exit_code(e: &cli::CliError) -> ExitCode {
    ExitCode::from(e.exit_code as u8)
}
