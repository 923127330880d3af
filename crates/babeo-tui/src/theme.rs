//! Color palette and style constants for the BabeoLife TUI.

use ratatui::style::{Color, Modifier, Style};

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_TERRACOTTA: Color = Color::Rgb(224, 122, 95);
pub const C_GREEN: Color = Color::Rgb(142, 164, 154);
pub const C_SAGE: Color = Color::Rgb(216, 226, 220);
pub const C_PRIMARY: Color = Color::Rgb(230, 226, 218);
pub const C_SECONDARY: Color = Color::Rgb(156, 163, 175);
pub const C_MUTED: Color = Color::Rgb(96, 92, 88);
pub const C_SELECTION_BG: Color = Color::Rgb(52, 46, 42);
pub const C_PANEL_BORDER: Color = Color::Rgb(70, 66, 62);
pub const C_PANEL_BORDER_FOCUSED: Color = C_TERRACOTTA;
pub const C_USER_BUBBLE: Color = C_TERRACOTTA;
pub const C_BOT_BUBBLE: Color = C_SAGE;

/// Chip colour for a category's style tag.
pub fn category_color(style: &str) -> Color {
    match style {
        "rose" => Color::Rgb(244, 143, 177),
        "amber" => Color::Rgb(255, 202, 40),
        "indigo" => Color::Rgb(121, 134, 203),
        "emerald" => Color::Rgb(102, 187, 106),
        "purple" => Color::Rgb(186, 104, 200),
        "sky" => Color::Rgb(79, 195, 247),
        _ => C_SECONDARY,
    }
}

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_heading() -> Style {
    Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn style_selected() -> Style {
    Style::default()
        .bg(C_SELECTION_BG)
        .fg(C_PRIMARY)
        .add_modifier(Modifier::BOLD)
}

pub fn style_focused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER_FOCUSED)
}

pub fn style_unfocused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER)
}
