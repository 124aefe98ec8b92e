//! Warm "lampu malam" palette and semantic styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

use rumah_core::NotificationCategory;

// ── Core Palette ──────────────────────────────────────────────────────

pub const AMBER: Color = Color::Rgb(255, 196, 77); // #ffc44d
pub const WARM_WHITE: Color = Color::Rgb(240, 233, 210); // #f0e9d2
pub const TEAL: Color = Color::Rgb(94, 207, 177); // #5ecfb1
pub const SUCCESS_GREEN: Color = Color::Rgb(129, 219, 118); // #81db76
pub const WARNING_ORANGE: Color = Color::Rgb(255, 152, 74); // #ff984a
pub const ERROR_RED: Color = Color::Rgb(245, 96, 96); // #f56060

// ── Extended Palette ──────────────────────────────────────────────────

pub const DIM_TEXT: Color = Color::Rgb(166, 160, 140); // #a6a08c
pub const BORDER_GRAY: Color = Color::Rgb(92, 90, 80); // #5c5a50
pub const BG_HIGHLIGHT: Color = Color::Rgb(46, 43, 35); // #2e2b23
pub const BG_DARK: Color = Color::Rgb(28, 27, 22); // #1c1b16

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(AMBER).add_modifier(Modifier::BOLD)
}

/// Border for a focused panel.
pub fn border_focused() -> Style {
    Style::default().fg(AMBER)
}

/// Border for an unfocused panel.
pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Normal body text.
pub fn body() -> Style {
    Style::default().fg(WARM_WHITE)
}

/// De-emphasized text (placeholders, timestamps).
pub fn dim() -> Style {
    Style::default().fg(DIM_TEXT)
}

/// Selected / highlighted card or row.
pub fn selected() -> Style {
    Style::default()
        .fg(AMBER)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Something switched on (light lit, device running).
pub fn on_style() -> Style {
    Style::default().fg(AMBER).add_modifier(Modifier::BOLD)
}

/// Something switched off.
pub fn off_style() -> Style {
    Style::default().fg(DIM_TEXT)
}

/// Active tab in the tab bar.
pub fn tab_active() -> Style {
    Style::default().fg(AMBER).add_modifier(Modifier::BOLD)
}

/// Inactive tab in the tab bar.
pub fn tab_inactive() -> Style {
    Style::default().fg(DIM_TEXT)
}

/// Key hint text (e.g., "q quit  ? help").
pub fn key_hint() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Key hint key character.
pub fn key_hint_key() -> Style {
    Style::default().fg(TEAL).add_modifier(Modifier::BOLD)
}

/// Color for a notification category.
pub fn category_color(category: NotificationCategory) -> Color {
    match category {
        NotificationCategory::Info => TEAL,
        NotificationCategory::Warning => WARNING_ORANGE,
        NotificationCategory::Danger => ERROR_RED,
    }
}

/// Color for the energy gauge at a given load ratio (0.0 ..= 1.0).
pub fn energy_color(load_ratio: f64) -> Color {
    if load_ratio >= 0.75 {
        ERROR_RED
    } else if load_ratio >= 0.5 {
        WARNING_ORANGE
    } else {
        SUCCESS_GREEN
    }
}
