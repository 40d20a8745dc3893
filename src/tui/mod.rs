//! Terminal user interface.
//!
//! This module contains the terminal setup/teardown, the main event loop,
//! `AppState`, and the widgets of the settings window.

pub mod component;
pub mod message_box;
pub mod settings_window;
pub mod theme;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::io;
use std::panic;
use std::time::Duration;
use tracing::{error, warn};

use crate::coordinator::{AppContext, Flow, SettingsCoordinator};
use crate::launcher::KeymapLauncher;
use crate::store::ConfigStore;

pub use component::Component;
pub use message_box::{MessageBox, MessageBoxEvent, MessageKind};
pub use settings_window::{Focus, SettingsWindow, WindowEvent};
pub use theme::Theme;

/// Terminal type used by the application.
pub type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Application state for the settings window.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The settings window
    pub window: SettingsWindow,
    /// Modal dialog shown over the window, if any
    pub popup: Option<MessageBox>,
    /// Active color theme
    pub theme: Theme,
}

impl AppState {
    /// Creates the state for a freshly initialized coordinator.
    pub fn new(coordinator: SettingsCoordinator, theme: Theme) -> Self {
        Self {
            window: SettingsWindow::new(coordinator),
            popup: None,
            theme,
        }
    }
}

/// Setup terminal for TUI
pub fn setup_terminal() -> Result<AppTerminal> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: AppTerminal) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Installs a panic hook that restores the terminal before printing the panic.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// Renders the window and any popup on top of it.
pub fn render(f: &mut Frame, state: &AppState) {
    let area = f.area();
    state.window.render(f, area, &state.theme);
    if let Some(popup) = &state.popup {
        popup.render(f, area, &state.theme);
    }
}

/// Dispatches one key press.
///
/// User-correctable failures open an error dialog and keep the window
/// running; fatal ones are returned to the caller.
pub fn handle_key_event<S: ConfigStore, L: KeymapLauncher>(
    state: &mut AppState,
    ctx: &AppContext<S, L>,
    key: KeyEvent,
) -> Result<Flow> {
    if key.kind != KeyEventKind::Press {
        return Ok(Flow::Continue);
    }

    if let Some(popup) = state.popup.as_mut() {
        if popup.handle_input(key) == Some(MessageBoxEvent::Dismissed) {
            state.popup = None;
        }
        return Ok(Flow::Continue);
    }

    let Some(event) = state.window.handle_input(key) else {
        return Ok(Flow::Continue);
    };

    match event {
        WindowEvent::Apply(mode) => match state.window.coordinator().apply(ctx, mode) {
            Ok(flow) => Ok(flow),
            Err(e) if e.is_fatal() => {
                error!("{e}");
                Err(e.into())
            }
            Err(e) => {
                warn!("{e}");
                state.popup = Some(MessageBox::error(e.to_string()));
                Ok(Flow::Continue)
            }
        },
        WindowEvent::Cancel | WindowEvent::Quit => Ok(state.window.coordinator().cancel()),
        WindowEvent::About => {
            state.popup = Some(MessageBox::about());
            Ok(Flow::Continue)
        }
    }
}

/// Waits up to 100 ms for a key event from the terminal.
pub fn poll_key() -> Result<Option<KeyEvent>> {
    if event::poll(Duration::from_millis(100))? {
        if let Event::Key(key) = event::read()? {
            return Ok(Some(key));
        }
    }
    Ok(None)
}

/// Main event loop
///
/// `next_key` yields the next key event, or `None` when nothing arrived in time.
pub fn run_tui<B, S, L, K>(
    state: &mut AppState,
    ctx: &AppContext<S, L>,
    terminal: &mut Terminal<B>,
    mut next_key: K,
) -> Result<()>
where
    B: Backend,
    S: ConfigStore,
    L: KeymapLauncher,
    K: FnMut() -> Result<Option<KeyEvent>>,
{
    loop {
        terminal.draw(|f| render(f, state))?;

        if let Some(key) = next_key()? {
            if handle_key_event(state, ctx, key)? == Flow::Quit {
                break;
            }
        }
    }

    Ok(())
}

/// Shows a single dialog until the user dismisses it.
pub fn run_message_box<B, K>(
    dialog: &mut MessageBox,
    theme: &Theme,
    terminal: &mut Terminal<B>,
    mut next_key: K,
) -> Result<()>
where
    B: Backend,
    K: FnMut() -> Result<Option<KeyEvent>>,
{
    loop {
        terminal.draw(|f| dialog.render(f, f.area(), theme))?;

        if let Some(key) = next_key()? {
            if key.kind == KeyEventKind::Press
                && dialog.handle_input(key) == Some(MessageBoxEvent::Dismissed)
            {
                return Ok(());
            }
        }
    }
}
