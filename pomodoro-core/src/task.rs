//! Tasks and the ordered task list.
//!
//! Position in the list is the user-facing identity (`1. Write report`).
//! Each task also carries a generated [`TaskId`] so that a paused
//! countdown can find its task again after other entries were deleted.

use uuid::Uuid;

use crate::error::ActionError;

/// Maximum allowed task name length in characters.
pub const MAX_TASK_NAME_LENGTH: usize = 256;

/// Seconds per minute of task budget.
pub const SECS_PER_MINUTE: u64 = 60;

/// Unique identifier for a task, based on UUID v7 for time-ordering.
///
/// Identifiers live only in memory; the task file does not store them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Creates a new time-ordered task identifier (UUID v7).
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named unit of work with a fixed time budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// In-memory identity.
    pub id: TaskId,
    /// Display name. Not required to be unique.
    pub name: String,
    /// Time budget in seconds.
    pub budget_secs: u64,
}

impl Task {
    /// Creates a task with a fresh identifier.
    #[must_use]
    pub fn new(name: impl Into<String>, budget_secs: u64) -> Self {
        Self {
            id: TaskId::new(),
            name: name.into(),
            budget_secs,
        }
    }

    /// Whole minutes of budget, used to prefill the edit prompt.
    #[must_use]
    pub const fn minutes(&self) -> u64 {
        self.budget_secs / SECS_PER_MINUTE
    }
}

/// Parse a minutes prompt answer.
///
/// Only positive decimal integers are accepted. Fractional minutes are
/// rejected rather than truncated.
///
/// # Errors
///
/// Returns [`ActionError::Validation`] for empty, zero, negative,
/// fractional or non-numeric input.
pub fn parse_minutes(input: &str) -> Result<u32, ActionError> {
    let trimmed = input.trim();
    let invalid = || ActionError::validation("Please enter a valid number for the time limit.");
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    match trimmed.parse::<u32>() {
        Ok(0) | Err(_) => Err(invalid()),
        Ok(minutes) => Ok(minutes),
    }
}

/// Ordered list of tasks. Insertion order is the only ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
    max_name_len: usize,
}

impl Default for TaskList {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskList {
    /// Creates an empty list with the default name length limit.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tasks: Vec::new(),
            max_name_len: MAX_TASK_NAME_LENGTH,
        }
    }

    /// Creates a list from already loaded tasks.
    #[must_use]
    pub const fn from_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            max_name_len: MAX_TASK_NAME_LENGTH,
        }
    }

    /// Overrides the maximum accepted name length for new and edited tasks.
    #[must_use]
    pub const fn with_max_name_len(mut self, max_name_len: usize) -> Self {
        self.max_name_len = max_name_len;
        self
    }

    /// Appends `(name, minutes * 60)`.
    ///
    /// An empty name or zero minutes is a silent no-op and yields
    /// `Ok(None)`, matching a cancelled prompt.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Validation`] if the name exceeds the length
    /// limit.
    pub fn add(&mut self, name: &str, minutes: u32) -> Result<Option<&Task>, ActionError> {
        if name.trim().is_empty() || minutes == 0 {
            return Ok(None);
        }
        self.check_name_len(name)?;
        self.tasks
            .push(Task::new(name, u64::from(minutes) * SECS_PER_MINUTE));
        Ok(self.tasks.last())
    }

    /// Replaces the name and budget of the task at `index` in place.
    ///
    /// The task keeps its [`TaskId`]. An empty new name is treated as a
    /// cancelled prompt and returns `Ok(false)` without changes.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Selection`] if `index` is `None` or out of
    /// range, and [`ActionError::Validation`] for zero minutes or an
    /// overlong name.
    pub fn edit(&mut self, index: Option<usize>, name: &str, minutes: u32) -> Result<bool, ActionError> {
        let index = self.valid_index(index, "Please select a task to edit.")?;
        if name.trim().is_empty() {
            return Ok(false);
        }
        if minutes == 0 {
            return Err(ActionError::validation(
                "Please enter a valid number for the time limit.",
            ));
        }
        self.check_name_len(name)?;
        let task = &mut self.tasks[index];
        task.name = name.to_string();
        task.budget_secs = u64::from(minutes) * SECS_PER_MINUTE;
        Ok(true)
    }

    /// Removes and returns the task at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Selection`] if `index` is `None` or out of
    /// range.
    pub fn delete(&mut self, index: Option<usize>) -> Result<Task, ActionError> {
        let index = self.valid_index(index, "Please select a task to delete.")?;
        Ok(self.tasks.remove(index))
    }

    /// Display lines with a 1-based position prefix.
    #[must_use]
    pub fn list(&self) -> Vec<String> {
        self.tasks
            .iter()
            .enumerate()
            .map(|(i, task)| format!("{}. {}", i + 1, task.name))
            .collect()
    }

    /// Returns the task at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    /// Position of the task with the given identifier.
    #[must_use]
    pub fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    /// Whether a task with the given identifier is still in the list.
    #[must_use]
    pub fn contains(&self, id: TaskId) -> bool {
        self.position(id).is_some()
    }

    /// All tasks in order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of tasks.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Resolves the "no selection" sentinel and bounds-checks the index.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Selection`] with `message` when there is no
    /// usable selection.
    pub fn valid_index(&self, index: Option<usize>, message: &str) -> Result<usize, ActionError> {
        match index {
            Some(i) if i < self.tasks.len() => Ok(i),
            _ => Err(ActionError::selection(message)),
        }
    }

    fn check_name_len(&self, name: &str) -> Result<(), ActionError> {
        if name.chars().count() > self.max_name_len {
            return Err(ActionError::validation(format!(
                "Task name too long (max {} characters).",
                self.max_name_len
            )));
        }
        Ok(())
    }
}
