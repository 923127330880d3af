//! Smooth Unicode progress bar for the player bar.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use babeo_core::playback::PROGRESS_MAX;

use crate::theme::{C_MUTED, C_SECONDARY, C_TERRACOTTA};

const BLOCKS: [char; 9] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉', '█'];

/// Render a progress bar in `area`. `progress` is on the player's 0..=100
/// scale; `duration` is the episode's display duration.
pub fn draw_progress(frame: &mut Frame, area: Rect, progress: f64, duration: &str) {
    if area.width < 4 || area.height == 0 {
        return;
    }

    let left_label = format!("{:>3.0}%", progress.clamp(0.0, PROGRESS_MAX));
    let label_w = (left_label.len() + duration.len() + 2) as u16;
    let bar_w = area.width.saturating_sub(label_w).max(4) as usize;

    let bar = render_bar(progress / PROGRESS_MAX, bar_w);

    let spans = vec![
        Span::styled(format!("{} ", left_label), Style::default().fg(C_SECONDARY)),
        Span::styled(bar, Style::default().fg(C_TERRACOTTA)),
        Span::styled(format!(" {}", duration), Style::default().fg(C_MUTED)),
    ];
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Fill `width` cells to `fraction` (0.0..=1.0) using eighth blocks.
pub fn render_bar(fraction: f64, width: usize) -> String {
    let eighths = (fraction.clamp(0.0, 1.0) * width as f64 * 8.0) as usize;
    let full_blocks = eighths / 8;
    let partial = eighths % 8;

    let mut bar = String::with_capacity(width + 4);
    for _ in 0..full_blocks {
        bar.push('█');
    }
    if full_blocks < width {
        bar.push(BLOCKS[partial]);
        for _ in (full_blocks + 1)..width {
            bar.push(' ');
        }
    }
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_full() {
        assert_eq!(render_bar(0.0, 4), "    ");
        assert_eq!(render_bar(1.0, 4), "████");
    }

    #[test]
    fn half_cell_uses_partial_block() {
        // 0.5 of 3 cells = 1.5 cells = one full block then a half block.
        assert_eq!(render_bar(0.5, 3), "█▌ ");
    }

    #[test]
    fn out_of_range_is_clamped() {
        assert_eq!(render_bar(2.0, 2), "██");
        assert_eq!(render_bar(-1.0, 2), "  ");
    }
}
