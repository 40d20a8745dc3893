use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{backend::Backend, Terminal};
use std::process::ExitCode;
use tracing::{error, info};

use crate::config::ThemeMode;
use crate::coordinator::{AppContext, SettingsCoordinator};
use crate::error::SettingsResult;
use crate::launcher::KeymapLauncher;
use crate::store::ConfigStore;
use crate::tui;

/// Initializes the coordinator and runs the settings window until it closes.
///
/// Fatal initialization errors are returned before the terminal is touched.
/// Everything after that runs in the terminal, which is always restored.
pub fn run_settings_terminal<S: ConfigStore, L: KeymapLauncher>(
    ctx: &AppContext<S, L>,
    theme_mode: ThemeMode,
) -> Result<ExitCode> {
    let initialized = match SettingsCoordinator::initialize(ctx) {
        Err(e) if e.is_fatal() => return Err(e.into()),
        other => other,
    };

    // Detect the theme before raw mode; the OS query may print.
    let theme = tui::Theme::from_mode(theme_mode);

    let mut terminal = tui::setup_terminal()?;
    let result = run_initialized(initialized, ctx, theme, &mut terminal, tui::poll_key);

    // Restore terminal before reporting errors
    tui::restore_terminal(terminal)?;

    result
}

/// Runs the window for an initialized coordinator.
///
/// A keymap directory that cannot be listed is reported in a message box and
/// ends the application with a failure exit code once it is dismissed.
pub fn run_initialized<B, S, L, K>(
    initialized: SettingsResult<SettingsCoordinator>,
    ctx: &AppContext<S, L>,
    theme: tui::Theme,
    terminal: &mut Terminal<B>,
    mut next_key: K,
) -> Result<ExitCode>
where
    B: Backend,
    S: ConfigStore,
    L: KeymapLauncher,
    K: FnMut() -> Result<Option<KeyEvent>>,
{
    let coordinator = match initialized {
        Ok(coordinator) => coordinator,
        Err(e) => {
            error!("{e}");
            let mut dialog = tui::MessageBox::error(e.to_string());
            tui::run_message_box(&mut dialog, &theme, terminal, &mut next_key)?;
            return Ok(ExitCode::FAILURE);
        }
    };

    info!(
        "Current keymap {} among {} installed",
        coordinator.current_keymap(),
        coordinator.keymaps().len()
    );

    let mut state = tui::AppState::new(coordinator, theme);
    tui::run_tui(&mut state, ctx, terminal, next_key)?;
    Ok(ExitCode::SUCCESS)
}
