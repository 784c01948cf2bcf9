//! Background tick worker that owns the countdown.
//!
//! This module bridges the synchronous TUI event loop (crossterm
//! poll-based) with a tokio task that ticks the [`Countdown`]. The
//! worker is the only owner of the countdown; the UI talks to it through
//! [`TimerCommand`] / [`TimerEvent`] channels.
//!
//! # Architecture
//!
//! ```text
//! TUI (main thread)  ←── TimerEvent ───  tick worker (owns Countdown)
//!                     ─── TimerCommand →
//! ```
//!
//! The ticker only exists while the countdown is running, and commands
//! are handled as soon as they arrive, so a stop never waits for the
//! next tick.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior};

use pomodoro_core::countdown::{Completion, Countdown, CountdownSpec, Snapshot, TickOutcome};
use pomodoro_core::error::ActionError;

/// Commands sent from the TUI main loop to the tick worker.
#[derive(Debug, Clone)]
pub enum TimerCommand {
    /// Start a new countdown.
    Start(CountdownSpec),
    /// Stop the running countdown, keeping its remaining time.
    Stop,
    /// Resume the stopped countdown.
    Resume,
    /// Shut the worker down.
    Shutdown,
}

/// Events sent from the tick worker to the TUI main loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// A countdown started or resumed.
    Started(Snapshot),
    /// One period elapsed.
    Tick(Snapshot),
    /// The countdown was stopped by the user.
    Stopped(Snapshot),
    /// The countdown ran out on its own.
    Completed(Completion),
    /// A command was not valid in the current phase.
    Rejected(ActionError),
}

/// Configuration for the tick worker.
#[derive(Debug, Clone)]
pub struct TimerConfig {
    /// Tick period.
    pub tick: Duration,
    /// Capacity of the command and event channels.
    pub channel_capacity: usize,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_secs(1),
            channel_capacity: 64,
        }
    }
}

/// Handles returned by [`spawn_timer`].
pub struct TimerHandle {
    /// Send commands to the worker.
    pub commands: mpsc::Sender<TimerCommand>,
    /// Receive events from the worker.
    pub events: mpsc::Receiver<TimerEvent>,
    /// The worker task; finishes after [`TimerCommand::Shutdown`] or when
    /// either channel closes.
    pub task: JoinHandle<()>,
}

/// Spawn the tick worker on the current tokio runtime.
#[must_use]
pub fn spawn_timer(config: &TimerConfig) -> TimerHandle {
    let capacity = config.channel_capacity.max(1);
    let (cmd_tx, cmd_rx) = mpsc::channel(capacity);
    let (evt_tx, evt_rx) = mpsc::channel(capacity);
    let task = tokio::spawn(run_worker(config.tick, cmd_rx, evt_tx));
    TimerHandle {
        commands: cmd_tx,
        events: evt_rx,
        task,
    }
}

async fn run_worker(
    period: Duration,
    mut commands: mpsc::Receiver<TimerCommand>,
    events: mpsc::Sender<TimerEvent>,
) {
    let mut countdown = Countdown::new();
    let mut ticker: Option<Interval> = None;

    loop {
        let outgoing = tokio::select! {
            command = commands.recv() => {
                let Some(command) = command else {
                    tracing::debug!("timer command channel closed");
                    break;
                };
                match apply_command(&mut countdown, command) {
                    Applied::Shutdown => break,
                    Applied::Event(event) => {
                        match &event {
                            TimerEvent::Started(_) => ticker = Some(new_ticker(period)),
                            TimerEvent::Stopped(_) => ticker = None,
                            _ => {}
                        }
                        vec![event]
                    }
                }
            }
            () = next_tick(&mut ticker) => {
                match countdown.tick() {
                    Some(TickOutcome::Ticked(snapshot)) => vec![TimerEvent::Tick(snapshot)],
                    Some(TickOutcome::Completed { snapshot, completion }) => {
                        ticker = None;
                        tracing::info!(
                            label = %completion.label,
                            total_secs = completion.total,
                            "countdown completed"
                        );
                        vec![TimerEvent::Tick(snapshot), TimerEvent::Completed(completion)]
                    }
                    None => {
                        ticker = None;
                        Vec::new()
                    }
                }
            }
        };

        for event in outgoing {
            if events.send(event).await.is_err() {
                tracing::debug!("timer event receiver dropped");
                return;
            }
        }
    }
    tracing::debug!("timer worker stopped");
}

enum Applied {
    Event(TimerEvent),
    Shutdown,
}

fn apply_command(countdown: &mut Countdown, command: TimerCommand) -> Applied {
    let result = match command {
        TimerCommand::Start(spec) => countdown.start(spec).map(|snapshot| {
            tracing::info!(label = %snapshot.label, secs = snapshot.total, "countdown started");
            TimerEvent::Started(snapshot)
        }),
        TimerCommand::Stop => countdown.stop().map(|snapshot| {
            tracing::info!(label = %snapshot.label, remaining = snapshot.remaining, "countdown stopped");
            TimerEvent::Stopped(snapshot)
        }),
        TimerCommand::Resume => countdown.resume().map(|snapshot| {
            tracing::info!(label = %snapshot.label, remaining = snapshot.remaining, "countdown resumed");
            TimerEvent::Started(snapshot)
        }),
        TimerCommand::Shutdown => return Applied::Shutdown,
    };
    Applied::Event(result.unwrap_or_else(|err| {
        tracing::debug!(error = %err, "timer command rejected");
        TimerEvent::Rejected(err)
    }))
}

fn new_ticker(period: Duration) -> Interval {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Burst);
    interval
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
