//! Timer panel rendering (banner, label, readout and progress gauge).

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};

use pomodoro_core::countdown::Phase;

use super::theme;
use crate::app::App;

/// Render the countdown panel.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(Span::styled("Timer", theme::panel_title(theme::TIMER_TITLE)))
        .borders(Borders::ALL)
        .border_style(theme::normal());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let banner_height = app
        .banner
        .as_ref()
        .map_or(0, |lines| u16::try_from(lines.len()).unwrap_or(u16::MAX));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(banner_height),
            Constraint::Length(1), // Label
            Constraint::Length(1), // Readout
            Constraint::Length(1), // Gauge
            Constraint::Min(0),
        ])
        .split(inner);

    if let Some(lines) = &app.banner {
        let banner: Vec<Line> = lines
            .iter()
            .map(|l| Line::from(Span::styled(l.as_str(), theme::dimmed())))
            .collect();
        frame.render_widget(Paragraph::new(banner).alignment(Alignment::Center), chunks[0]);
    }

    let snapshot = &app.countdown;
    let color = theme::urgency_color(snapshot.urgency());
    let label = match snapshot.phase {
        Phase::Idle => "No timer running".to_string(),
        Phase::Running => snapshot.label.clone(),
        Phase::Stopped => format!("{} (stopped)", snapshot.label),
        Phase::Completed => format!("{} (done)", snapshot.label),
    };
    frame.render_widget(
        Paragraph::new(Span::styled(label, theme::bold())).alignment(Alignment::Center),
        chunks[1],
    );

    let readout = if snapshot.phase == Phase::Idle {
        Span::styled(snapshot.readout(), theme::dimmed())
    } else {
        Span::styled(snapshot.readout(), theme::panel_title(color))
    };
    frame.render_widget(
        Paragraph::new(readout).alignment(Alignment::Center),
        chunks[2],
    );

    let ratio = if snapshot.total == 0 {
        0.0
    } else {
        #[allow(clippy::cast_precision_loss)]
        let ratio = snapshot.remaining as f64 / snapshot.total as f64;
        ratio.clamp(0.0, 1.0)
    };
    let gauge = Gauge::default()
        .gauge_style(theme::normal().fg(color))
        .ratio(ratio)
        .label("");
    frame.render_widget(gauge, chunks[3]);
}
