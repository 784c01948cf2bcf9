//! Shared domain definitions for the Pomodoro timer.
//!
//! Nothing in this crate touches the clock, the filesystem or the
//! terminal. Callers feed it ticks and bytes.

pub mod codec;
pub mod countdown;
pub mod display;
pub mod error;
pub mod task;

pub use countdown::{
    Accumulator, Completion, Countdown, CountdownKind, CountdownSpec, Phase, Snapshot, TickOutcome,
};
pub use display::{Urgency, format_mm_ss};
pub use error::ActionError;
pub use task::{Task, TaskId, TaskList, parse_minutes};
