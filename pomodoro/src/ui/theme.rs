//! Theme and styling constants for the TUI.

use ratatui::style::{Color, Modifier, Style};

use pomodoro_core::display::Urgency;

use crate::app::NoticeLevel;

/// Primary foreground color.
pub const FG_PRIMARY: Color = Color::White;

/// Secondary foreground color (dimmed text).
pub const FG_SECONDARY: Color = Color::Gray;

/// Highlight color for focused elements.
pub const HIGHLIGHT: Color = Color::Cyan;

/// More than half of the countdown left.
pub const NOMINAL: Color = Color::Green;

/// Half or less left.
pub const WARNING: Color = Color::Yellow;

/// A fifth or less left; also error notices.
pub const CRITICAL: Color = Color::Red;

/// Panel title color for the tasks panel.
pub const TASKS_TITLE: Color = Color::Green;

/// Panel title color for the timer panel.
pub const TIMER_TITLE: Color = Color::Cyan;

/// Panel title color for the notices panel.
pub const NOTICES_TITLE: Color = Color::Blue;

/// Normal text style.
#[must_use]
pub fn normal() -> Style {
    Style::default().fg(FG_PRIMARY)
}

/// Dimmed text style (hints, metadata).
#[must_use]
pub fn dimmed() -> Style {
    Style::default().fg(FG_SECONDARY)
}

/// Bold text style.
#[must_use]
pub fn bold() -> Style {
    Style::default().fg(FG_PRIMARY).add_modifier(Modifier::BOLD)
}

/// Highlighted text style (dialog borders, active field).
#[must_use]
pub fn highlighted() -> Style {
    Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
}

/// Selected item style (in lists).
#[must_use]
pub fn selected() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Color for a countdown urgency class.
#[must_use]
pub const fn urgency_color(urgency: Urgency) -> Color {
    match urgency {
        Urgency::Nominal => NOMINAL,
        Urgency::Warning => WARNING,
        Urgency::Critical => CRITICAL,
    }
}

/// Style for a notice title by severity.
#[must_use]
pub fn notice(level: NoticeLevel) -> Style {
    match level {
        NoticeLevel::Info => Style::default()
            .fg(Color::Rgb(100, 140, 180))
            .add_modifier(Modifier::ITALIC),
        NoticeLevel::Warning => Style::default().fg(WARNING).add_modifier(Modifier::BOLD),
        NoticeLevel::Error => Style::default().fg(CRITICAL).add_modifier(Modifier::BOLD),
    }
}

/// Style for timestamps (dark gray).
#[must_use]
pub fn timestamp() -> Style {
    Style::default().fg(Color::Rgb(120, 120, 120))
}

/// Style for the input cursor (bright white, bold).
#[must_use]
pub fn input_cursor() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

/// Style for the status bar background (dark background with white foreground).
#[must_use]
pub fn status_bar_bg() -> Style {
    Style::default().fg(Color::White).bg(Color::Rgb(30, 30, 50))
}

/// Style for panel titles with a given color (bold).
#[must_use]
pub fn panel_title(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}
