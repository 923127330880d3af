//! Two-line list row for an episode card.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::ListItem,
};

use babeo_core::content::Episode;

use crate::{
    app_state::AppState,
    theme::{category_color, C_MUTED, C_PRIMARY, C_SECONDARY, C_TERRACOTTA},
    widgets::text::truncate,
};

/// Row 1: play glyph, title, category chip. Row 2: duration, date, summary.
pub fn episode_item<'a>(episode: &Episode, state: &AppState, width: u16) -> ListItem<'a> {
    let playing = state.is_playing_episode(episode);
    let glyph = if playing { "⏸ " } else { "▶ " };
    let (chip, chip_color) = match state.category_of(episode) {
        Some(c) => (c.label.clone(), category_color(&c.style)),
        None => (episode.category.to_string(), C_SECONDARY),
    };

    let width = width as usize;
    let title_w = width.saturating_sub(chip.len() + 6);
    let title_style = if playing {
        Style::default().fg(C_TERRACOTTA).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
    };
    let top = Line::from(vec![
        Span::styled(glyph, Style::default().fg(C_TERRACOTTA)),
        Span::styled(truncate(&episode.title, title_w), title_style),
        Span::raw("  "),
        Span::styled(format!("[{}]", chip), Style::default().fg(chip_color)),
    ]);

    let meta = format!("  {} · {} · ", episode.duration, episode.date_label());
    let summary_w = width.saturating_sub(meta.chars().count() + 1);
    let bottom = Line::from(vec![
        Span::styled(meta, Style::default().fg(C_MUTED)),
        Span::styled(
            truncate(&episode.summary, summary_w),
            Style::default().fg(C_SECONDARY),
        ),
    ]);

    ListItem::new(vec![top, bottom])
}
