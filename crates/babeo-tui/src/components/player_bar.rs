//! Player bar: the bottom strip shown while an episode is loaded.
//!
//! Not focusable. Space and `x` are global keys handled by the App.

use ratatui::crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    theme::{category_color, style_unfocused_border, C_MUTED, C_PRIMARY, C_SECONDARY, C_TERRACOTTA},
    widgets::{progress_bar::draw_progress, text::truncate},
};

/// Rows the bar occupies when visible.
pub const HEIGHT: u16 = 3;

pub struct PlayerBar;

impl PlayerBar {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlayerBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for PlayerBar {
    fn handle_key(&mut self, _key: KeyEvent, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        let Some(episode) = state.playback.current() else {
            return;
        };

        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(style_unfocused_border());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(inner);

        let glyph = if state.playback.is_playing() { "⏸" } else { "▶" };
        let (chip, chip_color) = match state.category_of(episode) {
            Some(c) => (c.label.clone(), category_color(&c.style)),
            None => (episode.category.to_string(), C_SECONDARY),
        };
        let hints = "  space play/pause · x close";
        let title_w = (inner.width as usize).saturating_sub(chip.len() + hints.len() + 8);

        let line = Line::from(vec![
            Span::styled(format!(" {} ", glyph), Style::default().fg(C_TERRACOTTA)),
            Span::styled(
                truncate(&episode.title, title_w),
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(chip, Style::default().fg(chip_color)),
            Span::styled(hints, Style::default().fg(C_MUTED)),
        ]);
        frame.render_widget(Paragraph::new(line), rows[0]);

        let bar_area = Rect {
            x: rows[1].x + 1,
            width: rows[1].width.saturating_sub(2),
            ..rows[1]
        };
        draw_progress(frame, bar_area, state.playback.progress(), &episode.duration);
    }
}
