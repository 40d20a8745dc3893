//! The settings window: a "Keyboard" tab with the keymap list and the NumLock
//! checkbox, above an OK / Cancel / Apply button row.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs},
    Frame,
};

use crate::constants::APP_NAME;
use crate::coordinator::{ApplyMode, SettingsCoordinator};
use crate::tui::component::Component;
use crate::tui::Theme;

/// Control that currently receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Character mapping file list
    Keymaps,
    /// NumLock checkbox
    NumLock,
    /// OK button
    Ok,
    /// Cancel button
    Cancel,
    /// Apply button
    Apply,
}

impl Focus {
    const ORDER: [Focus; 5] = [
        Focus::Keymaps,
        Focus::NumLock,
        Focus::Ok,
        Focus::Cancel,
        Focus::Apply,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    fn previous(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Events emitted by the settings window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    /// OK or Apply was activated
    Apply(ApplyMode),
    /// Cancel was activated
    Cancel,
    /// File > Quit
    Quit,
    /// Help > About
    About,
}

/// Settings window state.
#[derive(Debug, Clone)]
pub struct SettingsWindow {
    coordinator: SettingsCoordinator,
    focus: Focus,
}

impl SettingsWindow {
    /// Creates the window with the keymap list focused.
    pub fn new(coordinator: SettingsCoordinator) -> Self {
        Self {
            coordinator,
            focus: Focus::Keymaps,
        }
    }

    /// The coordinator behind the window.
    pub fn coordinator(&self) -> &SettingsCoordinator {
        &self.coordinator
    }

    /// Focused control.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    fn handle_keymaps_key(&mut self, key: KeyEvent) -> Option<WindowEvent> {
        match key.code {
            KeyCode::Up => self.coordinator.select_previous(),
            KeyCode::Down => self.coordinator.select_next(),
            KeyCode::Home => self.coordinator.select_first(),
            KeyCode::End => self.coordinator.select_last(),
            KeyCode::Backspace | KeyCode::Delete => self.coordinator.clear_selection(),
            KeyCode::Enter => return Some(WindowEvent::Apply(ApplyMode::Ok)),
            KeyCode::Char(c) if !c.is_control() => self.coordinator.select_by_initial(c),
            _ => {}
        }
        None
    }

    fn handle_num_lock_key(&mut self, key: KeyEvent) -> Option<WindowEvent> {
        match key.code {
            KeyCode::Char(' ') => {
                self.coordinator.toggle_num_lock();
                None
            }
            KeyCode::Enter => Some(WindowEvent::Apply(ApplyMode::Ok)),
            _ => None,
        }
    }

    fn handle_button_key(&mut self, key: KeyEvent) -> Option<WindowEvent> {
        match key.code {
            KeyCode::Left => {
                if self.focus != Focus::Ok {
                    self.focus = self.focus.previous();
                }
                None
            }
            KeyCode::Right => {
                if self.focus != Focus::Apply {
                    self.focus = self.focus.next();
                }
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => match self.focus {
                Focus::Ok => Some(WindowEvent::Apply(ApplyMode::Ok)),
                Focus::Apply => Some(WindowEvent::Apply(ApplyMode::Apply)),
                Focus::Cancel => Some(WindowEvent::Cancel),
                Focus::Keymaps | Focus::NumLock => None,
            },
            _ => None,
        }
    }

    fn render_keymaps(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let focused = self.focus == Focus::Keymaps;
        let items: Vec<ListItem> = self
            .coordinator
            .keymaps()
            .iter()
            .map(|name| ListItem::new(name.as_str()))
            .collect();

        let title = match self.coordinator.selected_keymap() {
            Some(name) => format!(" Character mapping file: {name} "),
            None => " Character mapping file: (none) ".to_string(),
        };

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(border_style(focused, theme)),
            )
            .highlight_style(
                Style::default()
                    .fg(theme.accent)
                    .bg(theme.highlight_bg)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut state = ListState::default().with_selected(self.coordinator.selected());
        f.render_stateful_widget(list, area, &mut state);
    }

    fn render_num_lock(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let focused = self.focus == Focus::NumLock;
        let mark = if self.coordinator.num_lock() { "x" } else { " " };
        let style = if focused {
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text)
        };

        let checkbox = Paragraph::new(Line::from(Span::styled(
            format!("[{mark}] Enable NumLock on login"),
            style,
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Num Lock ")
                .border_style(border_style(focused, theme)),
        );
        f.render_widget(checkbox, area);
    }

    fn render_buttons(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let button = |label: &'static str, focus: Focus| {
            let style = if self.focus == focus {
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(theme.text)
            };
            Span::styled(label, style)
        };

        let row = Paragraph::new(Line::from(vec![
            button("[   OK   ]", Focus::Ok),
            Span::raw(" "),
            button("[ Cancel ]", Focus::Cancel),
            Span::raw(" "),
            button("[ Apply  ]", Focus::Apply),
        ]))
        .alignment(Alignment::Right);
        f.render_widget(row, area);
    }
}

fn border_style(focused: bool, theme: &Theme) -> Style {
    if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.primary)
    }
}

impl Component for SettingsWindow {
    type Event = WindowEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('q' | 'Q') => Some(WindowEvent::Quit),
                _ => None,
            };
        }

        match key.code {
            KeyCode::F(1) => return Some(WindowEvent::About),
            KeyCode::Esc => return Some(WindowEvent::Cancel),
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return None;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.previous();
                return None;
            }
            _ => {}
        }

        match self.focus {
            Focus::Keymaps => self.handle_keymaps_key(key),
            Focus::NumLock => self.handle_num_lock_key(key),
            Focus::Ok | Focus::Cancel | Focus::Apply => self.handle_button_key(key),
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let window = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {APP_NAME} "))
            .title_alignment(Alignment::Center)
            .border_style(Style::default().fg(theme.primary))
            .style(Style::default().bg(theme.background).fg(theme.text));
        let inner = window.inner(area);
        f.render_widget(window, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Menu bar
                Constraint::Length(1), // Tabs
                Constraint::Min(5),    // Keymap list
                Constraint::Length(3), // Checkbox
                Constraint::Length(1), // Buttons
                Constraint::Length(1), // Hints
            ])
            .split(inner);

        let menu = Paragraph::new(Line::from(vec![
            Span::styled(" File", Style::default().fg(theme.primary)),
            Span::styled(" (Ctrl+Q Quit)   ", Style::default().fg(theme.text_muted)),
            Span::styled("Help", Style::default().fg(theme.primary)),
            Span::styled(" (F1 About)", Style::default().fg(theme.text_muted)),
        ]));
        f.render_widget(menu, chunks[0]);

        let tabs = Tabs::new(vec!["Keyboard"])
            .select(0)
            .highlight_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD));
        f.render_widget(tabs, chunks[1]);

        self.render_keymaps(f, chunks[2], theme);
        self.render_num_lock(f, chunks[3], theme);
        self.render_buttons(f, chunks[4], theme);

        let hints = Paragraph::new(
            "↑↓: Select | Type: Jump | Space: Toggle | Tab: Next | Enter: OK | Esc: Cancel",
        )
        .style(Style::default().fg(theme.text_muted))
        .alignment(Alignment::Center);
        f.render_widget(hints, chunks[5]);
    }
}
