//! Resources page: article cards and the sleep science chart.

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph, Wrap},
    Frame,
};

use babeo_core::chart;

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    theme::{
        category_color, style_heading, style_selected, C_GREEN, C_MUTED, C_PRIMARY, C_SECONDARY,
        C_TERRACOTTA,
    },
    widgets::pane_chrome::pane_chrome,
};

pub struct ResourcesPage {
    cursor: usize,
    expanded: Option<usize>,
    series: Vec<(f64, f64)>,
}

impl ResourcesPage {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            expanded: None,
            series: chart::sleep_cycle(),
        }
    }

    fn draw_articles(&self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let mut lines = Vec::new();
        for (i, article) in state.store.articles().iter().enumerate() {
            let (chip, color) = state
                .store
                .category(article.category)
                .map(|c| (c.label.clone(), category_color(&c.style)))
                .unwrap_or_else(|| (article.category.to_string(), C_SECONDARY));
            let title_style = if i == self.cursor && focused {
                style_selected()
            } else {
                style_heading()
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{} ", chip), Style::default().fg(color)),
                Span::styled(format!("· {}", article.read_time), Style::default().fg(C_MUTED)),
            ]));
            lines.push(Line::from(Span::styled(article.title.clone(), title_style)));
            lines.push(Line::from(Span::styled(
                article.excerpt.clone(),
                Style::default().fg(C_SECONDARY),
            )));
            if self.expanded == Some(i) {
                lines.push(Line::from(Span::styled(
                    article.content.clone(),
                    Style::default().fg(C_PRIMARY),
                )));
            } else {
                lines.push(Line::from(Span::styled(
                    "Read Article →",
                    Style::default().fg(C_TERRACOTTA),
                )));
            }
            lines.push(Line::default());
        }

        let block = pane_chrome("Parenting Resources", focused, None);
        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .wrap(Wrap { trim: false })
                .scroll((state.nav.scroll(), 0)),
            area,
        );
    }

    fn draw_chart(&self, frame: &mut Frame, area: Rect) {
        let block = pane_chrome("Sleep Science Corner", false, None);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(6),
            ])
            .split(inner);

        let intro = Paragraph::new(Span::styled(
            "Understanding your baby's sleep cycles is the first step to better rest for \
             everyone. Here is a typical 60-minute newborn cycle visualized.",
            Style::default().fg(C_SECONDARY),
        ))
        .wrap(Wrap { trim: true });
        frame.render_widget(intro, rows[0]);
        frame.render_widget(
            Paragraph::new(Span::styled(
                chart::TITLE,
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            )),
            rows[1],
        );

        let dataset = Dataset::default()
            .name("Sleep depth")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(C_GREEN))
            .data(&self.series);

        let x_labels: Vec<Line> = ["0", "15", "30", "45", "60"]
            .into_iter()
            .map(|l| Line::from(Span::styled(l, Style::default().fg(C_MUTED))))
            .collect();
        let y_labels: Vec<Line> = chart::Y_LABELS
            .iter()
            .map(|(_, l)| Line::from(Span::styled(*l, Style::default().fg(C_MUTED))))
            .collect();

        let chart_widget = Chart::new(vec![dataset])
            .x_axis(
                Axis::default()
                    .title(Span::styled("minutes", Style::default().fg(C_MUTED)))
                    .bounds(chart::X_BOUNDS)
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .bounds(chart::Y_BOUNDS)
                    .labels(y_labels),
            );
        frame.render_widget(chart_widget, rows[2]);
    }
}

impl Default for ResourcesPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for ResourcesPage {
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        let count = state.store.articles().len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down if count > 0 => {
                self.cursor = (self.cursor + 1).min(count - 1);
                vec![]
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.cursor = self.cursor.saturating_sub(1);
                vec![]
            }
            KeyCode::Enter if count > 0 => {
                self.expanded = match self.expanded {
                    Some(i) if i == self.cursor => None,
                    _ => Some(self.cursor),
                };
                vec![]
            }
            KeyCode::PageDown => vec![Action::Scroll(5)],
            KeyCode::PageUp => vec![Action::Scroll(-5)],
            _ => vec![],
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let direction = if area.width >= 100 {
            Direction::Horizontal
        } else {
            Direction::Vertical
        };
        let chunks = Layout::default()
            .direction(direction)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);
        self.draw_articles(frame, chunks[0], focused, state);
        self.draw_chart(frame, chunks[1]);
    }
}
