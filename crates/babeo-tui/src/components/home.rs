//! Home page: hero, latest episodes, topic grid and testimonials.
//!
//! The cursor walks one list made of the latest episodes followed by the
//! topics. Enter on an episode plays it; Enter on a topic opens the podcast
//! page filtered to that topic.

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use babeo_core::catalog::Filter;
use babeo_core::content::{CategoryId, Episode};
use babeo_core::navigation::Route;

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    theme::{
        category_color, style_heading, style_selected, C_GREEN, C_MUTED, C_SECONDARY,
        C_TERRACOTTA,
    },
    widgets::{episode_row::episode_item, pane_chrome::pane_chrome},
};

const LATEST: usize = 3;

enum Entry {
    Episode(String),
    Topic(CategoryId),
}

pub struct HomePage {
    cursor: usize,
}

impl HomePage {
    pub fn new() -> Self {
        Self { cursor: 0 }
    }

    fn entries(state: &AppState) -> Vec<Entry> {
        let latest = state
            .store
            .latest(LATEST)
            .iter()
            .map(|e| Entry::Episode(e.id.clone()));
        let topics = state.store.categories().iter().map(|c| Entry::Topic(c.id));
        latest.chain(topics).collect()
    }
}

impl Default for HomePage {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for HomePage {
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        let entries = Self::entries(state);
        if entries.is_empty() {
            return vec![];
        }
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.cursor = (self.cursor + 1).min(entries.len() - 1);
                vec![]
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.cursor = self.cursor.saturating_sub(1);
                vec![]
            }
            KeyCode::Enter => match entries.get(self.cursor) {
                Some(Entry::Episode(id)) => vec![Action::SelectEpisode(id.clone())],
                Some(Entry::Topic(id)) => vec![
                    Action::SetFilter(Filter::Category(*id)),
                    Action::Navigate(Route::Podcast),
                ],
                None => vec![],
            },
            KeyCode::Char('o') => match entries.get(self.cursor) {
                Some(Entry::Episode(id)) => vec![Action::Navigate(Route::Episode(id.clone()))],
                _ => vec![],
            },
            KeyCode::Char('L') => vec![Action::Navigate(Route::Podcast)],
            _ => vec![],
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let latest: Vec<&Episode> = state.store.latest(LATEST).iter().collect();
        let topics = state.store.categories();
        let testimonial_rows = state.store.testimonials().len() as u16 * 2;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6),
                Constraint::Length(latest.len() as u16 * 2 + 2),
                Constraint::Length(topics.len() as u16 + 2),
                Constraint::Min(testimonial_rows.min(4)),
            ])
            .split(area);

        // Hero
        let hero = vec![
            Line::from(Span::styled(
                " New Episode Out Now ",
                Style::default().fg(C_GREEN).add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled("Gentle voices for ", style_heading()),
                Span::styled(
                    "growing families.",
                    Style::default().fg(C_TERRACOTTA).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled(
                "A podcast dedicated to evidence-based, emotionally supportive guidance \
                 for pregnancy, postpartum, and the first years of parenthood.",
                Style::default().fg(C_SECONDARY),
            )),
            Line::from(Span::styled(
                "L listen now · 5 subscribe",
                Style::default().fg(C_MUTED),
            )),
        ];
        frame.render_widget(
            Paragraph::new(hero).wrap(Wrap { trim: true }),
            chunks[0],
        );

        // Latest episodes
        let block = pane_chrome("Latest Episodes", focused && self.cursor < latest.len(), None);
        let inner = block.inner(chunks[1]);
        frame.render_widget(block, chunks[1]);
        let items: Vec<ListItem> = latest
            .iter()
            .map(|e| episode_item(e, state, inner.width.saturating_sub(2)))
            .collect();
        let mut list_state = ListState::default()
            .with_selected((self.cursor < latest.len()).then_some(self.cursor));
        frame.render_stateful_widget(
            List::new(items)
                .highlight_style(style_selected())
                .highlight_symbol("│"),
            inner,
            &mut list_state,
        );

        // Browse by topic
        let block = pane_chrome("Browse by Topic", focused && self.cursor >= latest.len(), None);
        let inner = block.inner(chunks[2]);
        frame.render_widget(block, chunks[2]);
        let items: Vec<ListItem> = topics
            .iter()
            .map(|c| {
                ListItem::new(Line::from(vec![
                    Span::styled("● ", Style::default().fg(category_color(&c.style))),
                    Span::raw(c.label.clone()),
                ]))
            })
            .collect();
        let mut list_state = ListState::default().with_selected(
            self.cursor
                .checked_sub(latest.len())
                .filter(|i| *i < topics.len()),
        );
        frame.render_stateful_widget(
            List::new(items)
                .highlight_style(style_selected())
                .highlight_symbol("› "),
            inner,
            &mut list_state,
        );

        // From our community
        let mut lines = Vec::new();
        for t in state.store.testimonials() {
            lines.push(Line::from(Span::styled(
                format!("\"{}\"", t.quote),
                Style::default().fg(C_SECONDARY).add_modifier(Modifier::ITALIC),
            )));
            lines.push(Line::from(vec![
                Span::styled(format!("  {} ", t.name), style_heading()),
                Span::styled(t.role.to_uppercase(), Style::default().fg(C_MUTED)),
            ]));
        }
        let block = pane_chrome("From Our Community", false, None);
        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .wrap(Wrap { trim: true }),
            chunks[3],
        );
    }
}
