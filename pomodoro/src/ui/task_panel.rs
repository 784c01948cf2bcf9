//! Task panel rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};

use pomodoro_core::display::format_mm_ss;

use super::theme;
use crate::app::App;

/// Render the numbered task list with the selection highlighted.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let running = app.countdown.task_id().filter(|_| app.countdown.is_running());

    let items: Vec<ListItem> = app
        .store
        .tasks()
        .tasks()
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let marker = if running == Some(task.id) { "▶ " } else { "  " };
            let line = Line::from(vec![
                Span::styled(marker, theme::normal().fg(theme::NOMINAL)),
                Span::styled(format!("{}. {}", i + 1, task.name), theme::normal()),
                Span::raw(" "),
                Span::styled(format!("({})", format_mm_ss(task.budget_secs)), theme::dimmed()),
            ]);
            ListItem::new(line)
        })
        .collect();

    let title = Span::styled(
        format!("Tasks ({})", app.store.len()),
        theme::panel_title(theme::TASKS_TITLE),
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(theme::normal());

    let list = List::new(items)
        .block(block)
        .highlight_style(theme::selected());

    let mut state = ListState::default().with_selected(app.selected);
    frame.render_stateful_widget(list, area, &mut state);
}
