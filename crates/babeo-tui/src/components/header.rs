//! Header component: brand plus navigation tabs.
//!
//! Wide terminals get a row of tabs. Below `COMPACT_WIDTH` the tabs collapse
//! into a `☰` button and the links move to a dropdown menu that `m` toggles.
//! The dropdown is the only part of the header that takes focus.

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use babeo_core::navigation::Route;

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    theme::{style_focused_border, style_selected, C_GREEN, C_MUTED, C_PRIMARY, C_TERRACOTTA},
};

/// Terminals narrower than this get the collapsed menu.
pub const COMPACT_WIDTH: u16 = 72;

pub struct Header {
    cursor: usize,
}

impl Header {
    pub fn new() -> Self {
        Self { cursor: 0 }
    }

    /// Dropdown below the header, right-aligned in `area`.
    pub fn draw_menu(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let width = 22.min(area.width);
        let height = (Route::MENU.len() as u16 + 2).min(area.height);
        let popup = Rect {
            x: area.x + area.width - width,
            y: area.y,
            width,
            height,
        };
        let active = state.nav.route().section();
        let items: Vec<ListItem> = Route::MENU
            .iter()
            .map(|route| {
                let style = if *route == active {
                    Style::default().fg(C_TERRACOTTA)
                } else {
                    Style::default().fg(C_PRIMARY)
                };
                ListItem::new(Line::from(Span::styled(route.label(), style)))
            })
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(style_focused_border())
                    .title(" Menu "),
            )
            .highlight_style(style_selected())
            .highlight_symbol("› ");
        let mut list_state = ListState::default().with_selected(Some(self.cursor));
        frame.render_widget(Clear, popup);
        frame.render_stateful_widget(list, popup, &mut list_state);
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Header {
    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.cursor = (self.cursor + 1) % Route::MENU.len();
                vec![]
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.cursor = (self.cursor + Route::MENU.len() - 1) % Route::MENU.len();
                vec![]
            }
            KeyCode::Enter => vec![Action::Navigate(Route::MENU[self.cursor].clone())],
            KeyCode::Esc | KeyCode::Char('m') => vec![Action::CloseMenu],
            _ => vec![],
        }
    }

    fn on_action(&mut self, action: &Action, state: &AppState) {
        if matches!(action, Action::ToggleMenu) && state.nav.is_menu_open() {
            let section = state.nav.route().section();
            self.cursor = Route::MENU.iter().position(|r| *r == section).unwrap_or(0);
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        let mut spans = vec![
            Span::styled(" ✿ ", Style::default().fg(C_TERRACOTTA)),
            Span::styled(
                "BabeoLife",
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
        ];

        if area.width < COMPACT_WIDTH {
            let icon = if state.nav.is_menu_open() { "✕" } else { "☰" };
            let used: usize = spans.iter().map(|s| s.width()).sum();
            let pad = (area.width as usize).saturating_sub(used + 6);
            spans.push(Span::raw(" ".repeat(pad)));
            spans.push(Span::styled(
                format!("{} m ", icon),
                Style::default().fg(C_GREEN),
            ));
        } else {
            let active = state.nav.route().section();
            for (i, route) in Route::MENU.iter().enumerate() {
                let label = format!(" {} {} ", i + 1, route.label());
                let style = if *route == active {
                    Style::default()
                        .fg(C_TERRACOTTA)
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                } else {
                    Style::default().fg(C_MUTED)
                };
                spans.push(Span::styled(label, style));
            }
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
