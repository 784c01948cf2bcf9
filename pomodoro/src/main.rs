//! `pomodoro`: terminal Pomodoro focus timer.
//!
//! Keeps a list of timed tasks in a JSON file, counts one of them down at
//! a time and offers a break when a task finishes. Configuration via CLI
//! flags, environment variables, or config file
//! (`~/.config/pomodoro/config.toml`).
//!
//! ```bash
//! cargo run --bin pomodoro
//!
//! # Keep tasks elsewhere, ten minute breaks
//! cargo run --bin pomodoro -- --tasks-file ~/focus.json --break-minutes 10
//! ```

use std::io;
use std::path::Path;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;

use pomodoro::app::{App, NoticeLevel};
use pomodoro::banner::load_banner;
use pomodoro::config::{AppConfig, CliArgs};
use pomodoro::store::TaskStore;
use pomodoro::timer::{self, TimerCommand, TimerEvent};
use pomodoro::ui;

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > env > config file > defaults).
    let config = match AppConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            AppConfig::default()
        }
    };

    // Initialize logging before terminal setup (logs go to file, not stdout).
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!("pomodoro starting");

    // A task file we cannot read must not be overwritten later.
    let store = match TaskStore::open(&config.tasks_file, config.max_task_name_len) {
        Ok(store) => {
            tracing::info!(path = %store.path().display(), "using task file");
            store
        }
        Err(e) => {
            tracing::error!(error = %e, "cannot restore task list");
            eprintln!("Error: {e}");
            return Err(io::Error::other(e));
        }
    };

    // Set up terminal.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app.
    let result = run_app(&mut terminal, store, &config).await;

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("pomodoro exiting");
    result
}

/// Initialize file-based logging.
///
/// Logs are written to a file (never stdout, since ratatui owns the terminal).
/// Returns a [`WorkerGuard`] that must be held until shutdown to ensure all
/// buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("pomodoro.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Main application loop.
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    store: TaskStore,
    config: &AppConfig,
) -> io::Result<()> {
    let banner = load_banner(config.banner_path.as_deref());
    let mut app = App::new(store)
        .with_break_secs(config.break_secs)
        .with_timestamp_format(&config.timestamp_format)
        .with_banner(banner.as_ref().ok().cloned().flatten());
    if let Err(e) = &banner {
        app.report(e);
    }

    let mut handle = timer::spawn_timer(&config.to_timer_config());

    loop {
        // Step 1: Draw the UI frame.
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Step 2: Drain all pending TimerEvents (non-blocking).
        drain_timer_events(&mut app, &mut handle.events);

        // Step 3: Poll for terminal input events.
        if event::poll(config.poll_timeout)?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            // handle_key_event returns Some(TimerCommand) when the action
            // belongs to the tick worker (start, stop, resume, break).
            if let Some(command) = app.handle_key_event(key) {
                match handle.commands.try_send(command) {
                    Ok(()) => {}
                    Err(mpsc::error::TrySendError::Full(_)) => {
                        app.push_notice(NoticeLevel::Warning, "Timer", "Timer busy, try again");
                    }
                    Err(mpsc::error::TrySendError::Closed(_)) => {
                        tracing::error!("timer worker is gone");
                        app.push_notice(NoticeLevel::Error, "Timer", "Timer stopped working");
                    }
                }
            }
        }

        if app.should_quit {
            let _ = handle.commands.try_send(TimerCommand::Shutdown);
            return Ok(());
        }
    }
}

/// Drain all pending `TimerEvent`s from the receiver and apply them to the app.
fn drain_timer_events(app: &mut App, rx: &mut mpsc::Receiver<TimerEvent>) {
    while let Ok(event) = rx.try_recv() {
        app.apply_timer_event(event);
    }
}
