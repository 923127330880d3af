//! Podcast page: filter chip row over the filtered episode list.

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListState, Paragraph},
    Frame,
};

use babeo_core::navigation::Route;

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    theme::{style_selected, C_MUTED, C_PRIMARY, C_SELECTION_BG, C_TERRACOTTA},
    widgets::{episode_row::episode_item, pane_chrome::pane_chrome},
};

pub struct PodcastPage {
    list_state: ListState,
}

impl PodcastPage {
    pub fn new() -> Self {
        Self {
            list_state: ListState::default().with_selected(Some(0)),
        }
    }

    fn selected_id(&self, state: &AppState) -> Option<String> {
        let visible = state.catalog.visible_episodes();
        self.list_state
            .selected()
            .and_then(|i| visible.get(i))
            .map(|e| e.id.clone())
    }

    fn move_cursor(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.list_state.select(None);
            return;
        }
        let cur = self.list_state.selected().unwrap_or(0) as isize;
        let next = (cur + delta).clamp(0, len as isize - 1) as usize;
        self.list_state.select(Some(next));
    }
}

impl Default for PodcastPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for PodcastPage {
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        let len = state.catalog.visible_episodes().len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_cursor(1, len);
                vec![]
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_cursor(-1, len);
                vec![]
            }
            KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab => vec![Action::NextFilter],
            KeyCode::Char('h') | KeyCode::Left | KeyCode::BackTab => vec![Action::PrevFilter],
            KeyCode::Enter => self
                .selected_id(state)
                .map(Action::SelectEpisode)
                .into_iter()
                .collect(),
            KeyCode::Char('o') => self
                .selected_id(state)
                .map(|id| Action::Navigate(Route::Episode(id)))
                .into_iter()
                .collect(),
            _ => vec![],
        }
    }

    fn on_action(&mut self, action: &Action, state: &AppState) {
        if matches!(
            action,
            Action::NextFilter | Action::PrevFilter | Action::SetFilter(_)
        ) {
            let len = state.catalog.visible_episodes().len();
            self.list_state.select(if len == 0 { None } else { Some(0) });
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let block = pane_chrome("Podcast Episodes", focused, None);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(inner);

        let active = state.catalog.active();
        let mut chips = Vec::new();
        for chip in state.catalog.filters() {
            let style = if chip.filter == active {
                Style::default()
                    .fg(C_PRIMARY)
                    .bg(C_TERRACOTTA)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(C_MUTED).bg(C_SELECTION_BG)
            };
            chips.push(Span::styled(format!(" {} ", chip.label), style));
            chips.push(Span::raw(" "));
        }
        frame.render_widget(Paragraph::new(Line::from(chips)), chunks[0]);

        let visible = state.catalog.visible_episodes();
        if visible.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "No episodes in this topic yet.",
                    Style::default().fg(C_MUTED),
                )),
                chunks[1],
            );
            return;
        }
        let items: Vec<_> = visible
            .iter()
            .map(|e| episode_item(e, state, chunks[1].width.saturating_sub(2)))
            .collect();
        let list = List::new(items)
            .highlight_style(style_selected())
            .highlight_symbol("│");
        frame.render_stateful_widget(list, chunks[1], &mut self.list_state);
    }
}
