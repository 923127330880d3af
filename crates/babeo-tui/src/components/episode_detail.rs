//! Episode detail page (`/podcast/:id`).

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use babeo_core::content::Episode;
use babeo_core::navigation::Route;

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    theme::{
        category_color, style_heading, C_GREEN, C_MUTED, C_PRIMARY, C_SECONDARY, C_TERRACOTTA,
    },
    widgets::pane_chrome::{pane_chrome, Badge},
};

pub struct EpisodeDetail;

impl EpisodeDetail {
    pub fn new() -> Self {
        Self
    }

    fn episode<'a>(state: &'a AppState) -> Option<&'a Episode> {
        match state.nav.route() {
            Route::Episode(id) => state.store.episode(id),
            _ => None,
        }
    }

    fn body<'a>(episode: &'a Episode, state: &'a AppState) -> Vec<Line<'a>> {
        let mut lines = vec![
            Line::from(Span::styled("← Back to Podcast (b)", Style::default().fg(C_MUTED))),
            Line::default(),
        ];
        if let Some(category) = state.category_of(episode) {
            lines.push(Line::from(Span::styled(
                category.label.as_str(),
                Style::default().fg(category_color(&category.style)),
            )));
        }
        lines.push(Line::from(Span::styled(episode.title.as_str(), style_heading())));
        lines.push(Line::from(Span::styled(
            format!("{} · {}", episode.duration, episode.date_label()),
            Style::default().fg(C_MUTED),
        )));
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            episode.summary.as_str(),
            Style::default().fg(C_SECONDARY),
        )));
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Show Notes",
            Style::default().fg(C_GREEN).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            episode.show_notes.as_str(),
            Style::default().fg(C_PRIMARY),
        )));
        if !episode.takeaways.is_empty() {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                "Key Takeaways",
                Style::default().fg(C_GREEN).add_modifier(Modifier::BOLD),
            )));
            for takeaway in &episode.takeaways {
                lines.push(Line::from(vec![
                    Span::styled("♥ ", Style::default().fg(C_TERRACOTTA)),
                    Span::styled(takeaway.as_str(), Style::default().fg(C_PRIMARY)),
                ]));
            }
        }
        lines
    }
}

impl Default for EpisodeDetail {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for EpisodeDetail {
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => vec![Action::Scroll(1)],
            KeyCode::Char('k') | KeyCode::Up => vec![Action::Scroll(-1)],
            KeyCode::PageDown => vec![Action::Scroll(10)],
            KeyCode::PageUp => vec![Action::Scroll(-10)],
            KeyCode::Char('b') | KeyCode::Esc | KeyCode::Backspace => {
                vec![Action::Navigate(Route::Podcast)]
            }
            KeyCode::Enter => Self::episode(state)
                .map(|e| Action::SelectEpisode(e.id.clone()))
                .into_iter()
                .collect(),
            _ => vec![],
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let Some(episode) = Self::episode(state) else {
            let block = pane_chrome("Episode Details", focused, None);
            let lines = vec![
                Line::from(Span::styled("← Back to Podcast (b)", Style::default().fg(C_MUTED))),
                Line::default(),
                Line::from(Span::styled("Episode not found.", style_heading())),
            ];
            frame.render_widget(Paragraph::new(lines).block(block), area);
            return;
        };

        let badge = state.is_playing_episode(episode).then_some(Badge {
            text: "PLAYING",
            color: C_TERRACOTTA,
        });
        let block = pane_chrome("Episode Details", focused, badge);
        let paragraph = Paragraph::new(Self::body(episode, state))
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((state.nav.scroll(), 0));
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use babeo_core::content::ContentStore;
    use tokio::sync::mpsc;

    fn plain(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn meta_line_shows_normalised_date() {
        let (tick_tx, _tick_rx) = mpsc::channel(1);
        let state = AppState::new(Arc::new(ContentStore::builtin().unwrap()), tick_tx, false);
        let episode = state.store.episode("ep-104").unwrap();
        let lines: Vec<String> = EpisodeDetail::body(episode, &state).iter().map(plain).collect();
        assert!(lines.iter().any(|l| l.ends_with("· Nov 2, 2023")), "{lines:?}");
        assert!(!lines.iter().any(|l| l.contains("Nov 02")));
    }
}
