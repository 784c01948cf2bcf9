//! The countdown state machine.
//!
//! ```text
//! Idle ──start──▶ Running ──tick to 0──▶ Completed ──start──▶ Running
//!                  │   ▲
//!                stop  resume
//!                  ▼   │
//!                 Stopped
//! ```
//!
//! The machine has no clock. Whoever owns it calls [`Countdown::tick`]
//! once per period.

use crate::display::{Urgency, format_mm_ss};
use crate::error::ActionError;
use crate::task::{Task, TaskId};

/// Label used for break countdowns.
pub const BREAK_LABEL: &str = "Break";

/// Default break length offered after a task completes.
pub const DEFAULT_BREAK_SECS: u64 = 5 * 60;

/// What a countdown is timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownKind {
    /// A task from the list.
    Task(TaskId),
    /// A break offered after a completed task.
    Break,
}

/// Lifecycle phase of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing has been started yet.
    #[default]
    Idle,
    /// Ticking.
    Running,
    /// Manually stopped; may be resumed.
    Stopped,
    /// Reached zero on its own.
    Completed,
}

/// Parameters for [`Countdown::start`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownSpec {
    /// Text shown next to the readout.
    pub label: String,
    /// Total duration in seconds.
    pub duration_secs: u64,
    /// Task or break.
    pub kind: CountdownKind,
}

impl CountdownSpec {
    /// A countdown for the whole budget of `task`.
    #[must_use]
    pub fn for_task(task: &Task) -> Self {
        Self {
            label: task.name.clone(),
            duration_secs: task.budget_secs,
            kind: CountdownKind::Task(task.id),
        }
    }

    /// A break countdown of `duration_secs`.
    #[must_use]
    pub fn break_of(duration_secs: u64) -> Self {
        Self {
            label: BREAK_LABEL.to_string(),
            duration_secs,
            kind: CountdownKind::Break,
        }
    }
}

/// Read-only view of the countdown, sent to the display.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    /// Label of the current or last countdown.
    pub label: String,
    /// `None` until the first start.
    pub kind: Option<CountdownKind>,
    /// Seconds left.
    pub remaining: u64,
    /// Seconds the current run started with.
    pub total: u64,
    /// Current phase.
    pub phase: Phase,
}

impl Snapshot {
    /// `MM:SS` readout of the remaining time.
    #[must_use]
    pub fn readout(&self) -> String {
        format_mm_ss(self.remaining)
    }

    /// Urgency colour class of the remaining time.
    #[must_use]
    pub const fn urgency(&self) -> Urgency {
        Urgency::from_fraction(self.remaining, self.total)
    }

    /// Whether the countdown is ticking.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Whether [`Countdown::resume`] would be accepted.
    #[must_use]
    pub fn can_resume(&self) -> bool {
        self.phase == Phase::Stopped && self.remaining > 0
    }

    /// Identifier of the task being timed, if it is a task countdown.
    #[must_use]
    pub const fn task_id(&self) -> Option<TaskId> {
        match self.kind {
            Some(CountdownKind::Task(id)) => Some(id),
            _ => None,
        }
    }
}

/// Summary of a countdown that ran out on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Label of the finished countdown.
    pub label: String,
    /// Task or break.
    pub kind: CountdownKind,
    /// Seconds the finished run started with.
    pub total: u64,
}

/// Result of a tick on a running countdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still running.
    Ticked(Snapshot),
    /// Reached zero on this tick.
    Completed {
        /// Final readout (`00:00`, phase `Completed`).
        snapshot: Snapshot,
        /// What finished.
        completion: Completion,
    },
}

/// The single countdown. Invariant: `remaining <= total`.
#[derive(Debug, Clone, Default)]
pub struct Countdown {
    phase: Phase,
    remaining: u64,
    total: u64,
    label: String,
    kind: Option<CountdownKind>,
}

impl Countdown {
    /// Creates an idle countdown.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Start a new run with `remaining = total = spec.duration_secs`.
    ///
    /// Allowed from every phase except `Running`; starting over a stopped
    /// countdown discards it.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::StateConflict`] if a countdown is running.
    pub fn start(&mut self, spec: CountdownSpec) -> Result<Snapshot, ActionError> {
        if self.phase == Phase::Running {
            return Err(ActionError::conflict("The timer is already running."));
        }
        self.phase = Phase::Running;
        self.remaining = spec.duration_secs;
        self.total = spec.duration_secs;
        self.label = spec.label;
        self.kind = Some(spec.kind);
        Ok(self.snapshot())
    }

    /// Advance one period. Returns `None` unless running.
    ///
    /// The tick that brings `remaining` to zero completes the run, so a
    /// countdown of `D` seconds completes on tick `D` after showing
    /// `D, D-1, …, 0`. A zero-length run completes on its first tick.
    pub fn tick(&mut self) -> Option<TickOutcome> {
        if self.phase != Phase::Running {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining > 0 {
            return Some(TickOutcome::Ticked(self.snapshot()));
        }
        self.phase = Phase::Completed;
        let kind = self.kind.unwrap_or(CountdownKind::Break);
        Some(TickOutcome::Completed {
            snapshot: self.snapshot(),
            completion: Completion {
                label: self.label.clone(),
                kind,
                total: self.total,
            },
        })
    }

    /// Stop a running countdown, keeping its remaining time.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::StateConflict`] if nothing is running.
    pub fn stop(&mut self) -> Result<Snapshot, ActionError> {
        if self.phase != Phase::Running {
            return Err(ActionError::conflict("The timer is not running."));
        }
        self.phase = Phase::Stopped;
        Ok(self.snapshot())
    }

    /// Restart a stopped countdown from its remaining time.
    ///
    /// The resumed run starts fresh with `total = remaining`, exactly as
    /// if [`start`](Self::start) had been called with the leftover time.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::StateConflict`] unless the countdown is
    /// stopped with time left.
    pub fn resume(&mut self) -> Result<Snapshot, ActionError> {
        if self.phase != Phase::Stopped || self.remaining == 0 {
            return Err(ActionError::conflict(
                "The timer is already running or no task is paused.",
            ));
        }
        self.total = self.remaining;
        self.phase = Phase::Running;
        Ok(self.snapshot())
    }

    /// Current view.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            label: self.label.clone(),
            kind: self.kind,
            remaining: self.remaining,
            total: self.total,
            phase: self.phase,
        }
    }
}

/// Seconds spent on naturally completed task countdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Accumulator(u64);

impl Accumulator {
    /// Starts at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Total seconds so far.
    #[must_use]
    pub const fn total_secs(&self) -> u64 {
        self.0
    }

    /// Credit a completion. Breaks are not credited.
    ///
    /// Returns whether the total changed.
    pub const fn record(&mut self, completion: &Completion) -> bool {
        match completion.kind {
            CountdownKind::Task(_) => {
                self.0 = self.0.saturating_add(completion.total);
                true
            }
            CountdownKind::Break => false,
        }
    }
}
