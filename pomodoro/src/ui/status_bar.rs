//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::app::{App, Dialog};

/// Render the status bar at the bottom of the screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let help_text = match app.dialog {
        Some(Dialog::TaskForm(_)) => "Enter: next/save | Tab: switch field | Esc: cancel",
        Some(Dialog::ConfirmBreak { .. }) => "y/Enter: start break | n/Esc: skip",
        None => {
            "a: add | e: edit | d: delete | s/Enter: start | p/Space: stop | r: resume | ↑↓/jk: select | q: quit"
        }
    };

    let status_line = Line::from(vec![
        Span::styled(concat!("Pomodoro v", env!("CARGO_PKG_VERSION")), theme::bold()),
        Span::raw(" | "),
        Span::styled("Focused ", theme::normal()),
        Span::styled(app.focused_readout(), theme::panel_title(theme::NOMINAL)),
        Span::raw(" | "),
        Span::styled(help_text, theme::dimmed()),
    ]);

    let paragraph = Paragraph::new(status_line).style(theme::status_bar_bg());
    frame.render_widget(paragraph, area);
}
