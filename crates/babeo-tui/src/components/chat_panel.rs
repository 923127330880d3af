//! Chat panel: floating "Babeo Assistant" window over the bottom-right of
//! the page. While open it owns the keyboard.

use ratatui::crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use babeo_core::chat::ChatRole;

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    theme::{C_BOT_BUBBLE, C_MUTED, C_TERRACOTTA, C_USER_BUBBLE},
    widgets::{
        chat_input::{ChatInput, InputAction},
        pane_chrome::{pane_chrome, Badge},
        text::wrap_text,
    },
};

const TYPING: [&str; 4] = ["   ", "·  ", "·· ", "···"];

pub struct ChatPanel {
    input: ChatInput,
}

impl ChatPanel {
    pub fn new() -> Self {
        Self {
            input: ChatInput::new("Ask about sleep, feeding..."),
        }
    }

    /// Floating panel rect anchored to the bottom-right of `area`.
    pub fn rect(area: Rect) -> Rect {
        let width = (area.width / 2).clamp(36, 60).min(area.width);
        let height = (area.height * 3 / 4).clamp(10, 28).min(area.height);
        Rect {
            x: area.x + area.width - width,
            y: area.y + area.height - height,
            width,
            height,
        }
    }

    fn transcript_lines(state: &AppState, width: usize) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for message in state.chat.transcript() {
            let (label, color) = match message.role {
                ChatRole::User => ("You", C_USER_BUBBLE),
                ChatRole::Assistant => ("Babeo", C_BOT_BUBBLE),
            };
            lines.push(Line::from(Span::styled(
                label,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )));
            for row in wrap_text(&message.text, width.saturating_sub(2)) {
                lines.push(Line::from(Span::styled(
                    format!("  {}", row),
                    Style::default().fg(color),
                )));
            }
            lines.push(Line::default());
        }
        if state.chat.is_loading() {
            let frame = TYPING[state.spinner_frame % TYPING.len()];
            lines.push(Line::from(vec![
                Span::styled(
                    "Babeo ",
                    Style::default().fg(C_BOT_BUBBLE).add_modifier(Modifier::BOLD),
                ),
                Span::styled(frame, Style::default().fg(C_MUTED)),
            ]));
        }
        lines
    }
}

impl Default for ChatPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for ChatPanel {
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        match self.input.handle_key(key) {
            InputAction::Changed(text) => vec![Action::ChatInputChanged(text)],
            InputAction::Submit if state.chat.can_submit(self.input.text()) => {
                vec![Action::SubmitChat]
            }
            InputAction::Submit | InputAction::None => vec![],
            InputAction::Cancelled => vec![Action::CloseChat],
        }
    }

    fn on_action(&mut self, action: &Action, state: &AppState) {
        if matches!(action, Action::SubmitChat | Action::OpenChat) {
            self.input.sync(state.chat.input());
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let popup = Self::rect(area);
        let badge = (!state.chat_configured).then_some(Badge {
            text: "OFFLINE",
            color: C_MUTED,
        });
        let block = pane_chrome("Babeo Assistant · Esc to close", focused, badge);
        let inner = block.inner(popup);
        frame.render_widget(Clear, popup);
        frame.render_widget(block, popup);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        let lines = Self::transcript_lines(state, rows[0].width as usize);
        // Stick to the newest message.
        let overflow = (lines.len() as u16).saturating_sub(rows[0].height);
        frame.render_widget(Paragraph::new(lines).scroll((overflow, 0)), rows[0]);

        self.input
            .draw(frame, rows[1], focused && !state.chat.is_loading());
        if state.chat.is_loading() {
            let hint = Rect {
                x: rows[1].x + rows[1].width.saturating_sub(10),
                width: rows[1].width.min(10),
                ..rows[1]
            };
            frame.render_widget(
                Paragraph::new(Span::styled("thinking…", Style::default().fg(C_TERRACOTTA))),
                hint,
            );
        }
    }
}
