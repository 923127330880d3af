//! Static About and Subscribe pages.

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use babeo_core::navigation::Route;

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    theme::{style_heading, C_GREEN, C_MUTED, C_PRIMARY, C_SECONDARY, C_TERRACOTTA},
    widgets::pane_chrome::pane_chrome,
};

const PHILOSOPHY: [&str; 3] = [
    "Gentle discipline and responsive parenting.",
    "Evidence-based information, not fear-mongering.",
    "Inclusivity for all family structures.",
];

pub struct InfoPage;

impl InfoPage {
    pub fn new() -> Self {
        Self
    }

    fn about() -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled("About BabeoLife", style_heading())),
            Line::default(),
            Line::from(Span::styled(
                "BabeoLife was born from a simple belief: parenting shouldn't feel like a \
                 constant state of panic. We provide a calm corner of the internet where \
                 science meets instinct.",
                Style::default().fg(C_SECONDARY),
            )),
            Line::default(),
            Line::from(Span::styled(
                "Our Philosophy",
                Style::default().fg(C_GREEN).add_modifier(Modifier::BOLD),
            )),
        ];
        lines.extend(PHILOSOPHY.iter().map(|item| {
            Line::from(vec![
                Span::styled("♥ ", Style::default().fg(C_TERRACOTTA)),
                Span::styled(*item, Style::default().fg(C_PRIMARY)),
            ])
        }));
        lines
    }

    fn subscribe() -> Vec<Line<'static>> {
        vec![
            Line::from(Span::styled("Join the Family", style_heading())),
            Line::default(),
            Line::from(Span::styled(
                "Get weekly gentle guidance delivered to your inbox. No spam, just support.",
                Style::default().fg(C_SECONDARY),
            )),
            Line::default(),
            Line::from(Span::styled(
                "Find BabeoLife wherever you listen to podcasts.",
                Style::default().fg(C_MUTED),
            )),
        ]
    }
}

impl Default for InfoPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for InfoPage {
    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => vec![Action::Scroll(1)],
            KeyCode::Char('k') | KeyCode::Up => vec![Action::Scroll(-1)],
            _ => vec![],
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let (title, lines) = match state.nav.route() {
            Route::Subscribe => ("Subscribe", Self::subscribe()),
            _ => ("About", Self::about()),
        };
        let block = pane_chrome(title, focused, None);
        let paragraph = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .scroll((state.nav.scroll(), 0));
        frame.render_widget(paragraph, area);
    }
}
