//! ChatInput: wraps tui-input as the chat panel's composer line.

use ratatui::crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::theme::{C_MUTED, C_PRIMARY, C_SELECTION_BG};

pub enum InputAction {
    Changed(String),
    Submit,
    Cancelled,
    None,
}

pub struct ChatInput {
    input: Input,
    placeholder: String,
}

impl ChatInput {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            input: Input::default(),
            placeholder: placeholder.into(),
        }
    }

    /// Replace the value when the session's draft diverged (e.g. after a submit).
    pub fn sync(&mut self, value: &str) {
        if self.input.value() != value {
            self.input = Input::new(value.to_string());
        }
    }

    pub fn text(&self) -> &str {
        self.input.value()
    }

    /// Enter submits, Esc cancels, everything else edits the line.
    pub fn handle_key(&mut self, key: KeyEvent) -> InputAction {
        match key.code {
            KeyCode::Enter => InputAction::Submit,
            KeyCode::Esc => InputAction::Cancelled,
            _ => {
                let prior = self.input.value().to_string();
                self.input.handle_event(&Event::Key(key));
                if self.input.value() != prior {
                    InputAction::Changed(self.input.value().to_string())
                } else {
                    InputAction::None
                }
            }
        }
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect, enabled: bool) {
        let width = area.width.saturating_sub(3) as usize;
        let scroll = self.input.visual_scroll(width);
        let value = self.input.value();
        let display = if value.is_empty() {
            Span::styled(format!("› {}", self.placeholder), Style::default().fg(C_MUTED))
        } else {
            let visible: String = value.chars().skip(scroll).collect();
            Span::styled(format!("› {}", visible), Style::default().fg(C_PRIMARY))
        };
        let paragraph =
            Paragraph::new(Line::from(display)).style(Style::default().bg(C_SELECTION_BG));
        frame.render_widget(paragraph, area);

        if enabled {
            let cursor_x = area.x + 2 + (self.input.visual_cursor() - scroll) as u16;
            frame.set_cursor_position((cursor_x.min(area.x + area.width - 1), area.y));
        }
    }
}
