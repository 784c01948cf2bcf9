//! Terminal UI rendering.

pub mod dialog;
pub mod notice_panel;
pub mod status_bar;
pub mod task_panel;
pub mod theme;
pub mod timer_panel;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::app::App;

/// Main draw function for the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    // Create main layout with status bar at bottom
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),
            Constraint::Length(8),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40), // Tasks
            Constraint::Percentage(60), // Timer
        ])
        .split(main_chunks[0]);

    task_panel::render(frame, content_chunks[0], app);
    timer_panel::render(frame, content_chunks[1], app);
    notice_panel::render(frame, main_chunks[1], app);
    status_bar::render(frame, main_chunks[2], app);

    // Dialogs draw last, over everything else
    if let Some(dialog) = &app.dialog {
        dialog::render(frame, frame.area(), dialog);
    }
}
