//! User-facing action errors.
//!
//! Every variant carries the message shown to the user. None of them is
//! fatal: the failing action is aborted and state is left unchanged.

use thiserror::Error;

/// Errors reported back to the user when an action cannot be carried out.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ActionError {
    /// Bad or missing input (name, minutes).
    #[error("{0}")]
    Validation(String),
    /// The action needs a selected task and there is none.
    #[error("{0}")]
    Selection(String),
    /// An optional asset could not be loaded.
    #[error("{0}")]
    Resource(String),
    /// The countdown is in the wrong phase for this action.
    #[error("{0}")]
    StateConflict(String),
}

impl ActionError {
    /// Short title for the error kind, used as a notice heading.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Validation(_) => "Invalid Input",
            Self::Selection(_) => "No Task Selected",
            Self::Resource(_) => "Resource Error",
            Self::StateConflict(_) => "Timer",
        }
    }

    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub(crate) fn selection(msg: impl Into<String>) -> Self {
        Self::Selection(msg.into())
    }

    pub(crate) fn conflict(msg: impl Into<String>) -> Self {
        Self::StateConflict(msg.into())
    }
}
