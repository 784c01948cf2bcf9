//! Encoding of the task file.
//!
//! The file is a JSON array of two-element records,
//! `[[name, budget_seconds], ...]`, in list order. Task identifiers are
//! not stored; decoding assigns fresh ones.

use serde::{Deserialize, Serialize};

use crate::task::Task;

/// One persisted record, serialized as `[name, budget_seconds]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord(pub String, pub u64);

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> Self {
        Self(task.name.clone(), task.budget_secs)
    }
}

impl From<TaskRecord> for Task {
    fn from(TaskRecord(name, budget_secs): TaskRecord) -> Self {
        Self::new(name, budget_secs)
    }
}

/// Error type for codec encode/decode operations.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Encodes tasks into the JSON file format.
///
/// # Errors
///
/// Returns `CodecError::Serialization` if the records cannot be serialized.
pub fn encode(tasks: &[Task]) -> Result<String, CodecError> {
    let records: Vec<TaskRecord> = tasks.iter().map(TaskRecord::from).collect();
    serde_json::to_string(&records).map_err(|e| CodecError::Serialization(e.to_string()))
}

/// Decodes tasks from the JSON file format.
///
/// Blank input (empty or whitespace only) decodes to an empty list.
/// Anything else must be a well-formed array of `[string, non-negative
/// integer]` records.
///
/// # Errors
///
/// Returns `CodecError::Serialization` if the text is not valid JSON or
/// does not have the expected shape.
pub fn decode(text: &str) -> Result<Vec<Task>, CodecError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    let records: Vec<TaskRecord> =
        serde_json::from_str(text).map_err(|e| CodecError::Serialization(e.to_string()))?;
    Ok(records.into_iter().map(Task::from).collect())
}
