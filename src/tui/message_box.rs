//! Modal message box.
//!
//! Blocks the window underneath until dismissed with Enter, Space or Esc.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::constants::APP_NAME;
use crate::tui::component::{centered_rect, Component};
use crate::tui::Theme;

/// Severity of a message box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Something went wrong
    Error,
    /// Plain information
    Information,
}

/// Events emitted by the message box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageBoxEvent {
    /// The user acknowledged the message
    Dismissed,
}

/// A modal dialog with a title, a message and a single OK button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBox {
    title: String,
    message: String,
    kind: MessageKind,
}

impl MessageBox {
    /// Creates a message box.
    pub fn new(title: impl Into<String>, message: impl Into<String>, kind: MessageKind) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            kind,
        }
    }

    /// Error dialog titled with the application name.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(APP_NAME, message, MessageKind::Error)
    }

    /// The Help > About dialog.
    pub fn about() -> Self {
        Self::new(
            format!("About {APP_NAME}"),
            format!(
                "{APP_NAME} {}\n\n{}",
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION")
            ),
            MessageKind::Information,
        )
    }

    /// Dialog title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Dialog message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Dialog severity.
    pub fn kind(&self) -> MessageKind {
        self.kind
    }
}

impl Component for MessageBox {
    type Event = MessageBoxEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => {
                Some(MessageBoxEvent::Dismissed)
            }
            _ => None,
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let area = centered_rect(60, 40, area);

        f.render_widget(Clear, area);

        let border_color = match self.kind {
            MessageKind::Error => theme.error,
            MessageKind::Information => theme.primary,
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", self.title))
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(theme.surface).fg(theme.text));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        let message = Paragraph::new(self.message.as_str())
            .wrap(Wrap { trim: false })
            .alignment(Alignment::Center);
        f.render_widget(message, chunks[0]);

        let button = Paragraph::new(Line::from(Span::styled(
            "[ OK ]",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        )))
        .alignment(Alignment::Center);
        f.render_widget(button, chunks[1]);
    }
}
