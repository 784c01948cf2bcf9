//! Modal dialog rendering (task form and break offer).

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use pomodoro_core::display::split_minutes;

use super::theme;
use crate::app::{Dialog, FormField, NoticeLevel, TaskForm};

/// Render `dialog` centred over `area`.
pub fn render(frame: &mut Frame, area: Rect, dialog: &Dialog) {
    let popup = centered(area, 56, 8);
    frame.render_widget(Clear, popup);
    match dialog {
        Dialog::TaskForm(form) => render_form(frame, popup, form),
        Dialog::ConfirmBreak { secs } => render_confirm(frame, popup, *secs),
    }
}

fn render_form(frame: &mut Frame, area: Rect, form: &TaskForm) {
    let field_line = |label: &'static str, value: &str, active: bool| {
        let mut spans = vec![
            Span::styled(label, if active { theme::highlighted() } else { theme::dimmed() }),
            Span::styled(value.to_string(), theme::normal()),
        ];
        if active {
            spans.push(Span::styled("█", theme::input_cursor()));
        }
        Line::from(spans)
    };

    let mut lines = vec![
        field_line("Task name: ", &form.name, form.field == FormField::Name),
        field_line("Minutes:   ", &form.minutes, form.field == FormField::Minutes),
        Line::raw(""),
    ];
    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            error.as_str(),
            theme::notice(NoticeLevel::Error),
        )));
    }

    let block = Block::default()
        .title(Span::styled(form.title(), theme::highlighted()))
        .borders(Borders::ALL)
        .border_style(theme::highlighted());
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn render_confirm(frame: &mut Frame, area: Rect, secs: u64) {
    let (minutes, seconds) = split_minutes(secs);
    let length = if seconds == 0 {
        format!("{minutes} minutes")
    } else {
        format!("{minutes} minutes {seconds} seconds")
    };
    let lines = vec![
        Line::raw(""),
        Line::from(Span::styled(
            format!("Do you want to start a break of {length}?"),
            theme::bold(),
        )),
        Line::raw(""),
        Line::from(Span::styled("[y] Yes    [n] No", theme::dimmed())),
    ];
    let block = Block::default()
        .title(Span::styled("Break Time", theme::highlighted()))
        .borders(Borders::ALL)
        .border_style(theme::highlighted());
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

/// A `width` x `height` rectangle centred in `area`, shrunk to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    popup
}
