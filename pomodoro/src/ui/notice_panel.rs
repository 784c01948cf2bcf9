//! Notice log rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use super::theme;
use crate::app::App;

/// Render the most recent notices, newest at the bottom.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let visible = usize::from(area.height.saturating_sub(2));
    let skip = app.notices.len().saturating_sub(visible);

    let items: Vec<ListItem> = app
        .notices
        .iter()
        .skip(skip)
        .map(|notice| {
            ListItem::new(Line::from(vec![
                Span::styled(&notice.timestamp, theme::timestamp()),
                Span::raw(" "),
                Span::styled(&notice.title, theme::notice(notice.level)),
                Span::raw(": "),
                Span::styled(&notice.text, theme::normal()),
            ]))
        })
        .collect();

    let block = Block::default()
        .title(Span::styled("Notices", theme::panel_title(theme::NOTICES_TITLE)))
        .borders(Borders::ALL)
        .border_style(theme::normal());

    frame.render_widget(List::new(items).block(block), area);
}
