//! File-backed task store.
//!
//! Wraps a [`TaskList`] and rewrites the whole task file after every
//! mutation. Loading happens once at startup: a missing or blank file is
//! an empty list, anything unreadable is an error the caller must treat
//! as fatal.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use pomodoro_core::codec::{self, CodecError};
use pomodoro_core::error::ActionError;
use pomodoro_core::task::{Task, TaskId, TaskList};

/// Errors that can occur while loading or saving the task file.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The task file exists but could not be read.
    #[error("failed to read task file {path}: {source}")]
    Read {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The task file could not be written.
    #[error("failed to write task file {path}: {source}")]
    Write {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The task file content is not a valid task list.
    #[error("corrupt task file {path}: {source}")]
    Corrupt {
        /// Path that was read.
        path: PathBuf,
        /// Decoder error.
        source: CodecError,
    },

    /// The task list could not be encoded.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// What happened to the file after a mutation.
#[derive(Debug)]
pub enum SaveOutcome {
    /// Nothing changed, nothing written (cancelled prompt).
    Unchanged,
    /// The list changed and the file was rewritten.
    Saved,
    /// The list changed in memory but the file could not be written.
    Failed(StoreError),
}

/// Ordered task list persisted to a single file.
pub struct TaskStore {
    tasks: TaskList,
    path: PathBuf,
}

impl TaskStore {
    /// Restore the store from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Read`] if the file exists but cannot be read,
    /// or [`StoreError::Corrupt`] if its content does not decode.
    pub fn open(path: impl Into<PathBuf>, max_name_len: usize) -> Result<Self, StoreError> {
        let path = path.into();
        let tasks = match fs::read_to_string(&path) {
            Ok(text) => codec::decode(&text).map_err(|source| StoreError::Corrupt {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no task file yet, starting empty");
                Vec::new()
            }
            Err(source) => return Err(StoreError::Read { path, source }),
        };
        tracing::info!(path = %path.display(), count = tasks.len(), "task list restored");
        Ok(Self {
            tasks: TaskList::from_tasks(tasks).with_max_name_len(max_name_len),
            path,
        })
    }

    /// The file this store writes to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read access to the list.
    #[must_use]
    pub const fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    /// Task at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    /// Whether the task with `id` still exists.
    #[must_use]
    pub fn contains(&self, id: TaskId) -> bool {
        self.tasks.contains(id)
    }

    /// Number of tasks.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the store holds no tasks.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Display lines, `"1. name"`.
    #[must_use]
    pub fn list(&self) -> Vec<String> {
        self.tasks.list()
    }

    /// Append a task and save.
    ///
    /// # Errors
    ///
    /// Propagates [`ActionError::Validation`] from the list; the file is
    /// not touched in that case.
    pub fn add(&mut self, name: &str, minutes: u32) -> Result<SaveOutcome, ActionError> {
        if self.tasks.add(name, minutes)?.is_none() {
            return Ok(SaveOutcome::Unchanged);
        }
        tracing::info!(name, minutes, "task added");
        Ok(self.commit())
    }

    /// Replace a task in place and save.
    ///
    /// # Errors
    ///
    /// Propagates [`ActionError::Selection`] and
    /// [`ActionError::Validation`] from the list.
    pub fn edit(
        &mut self,
        index: Option<usize>,
        name: &str,
        minutes: u32,
    ) -> Result<SaveOutcome, ActionError> {
        if !self.tasks.edit(index, name, minutes)? {
            return Ok(SaveOutcome::Unchanged);
        }
        tracing::info!(?index, name, minutes, "task edited");
        Ok(self.commit())
    }

    /// Remove a task and save.
    ///
    /// # Errors
    ///
    /// Propagates [`ActionError::Selection`] from the list.
    pub fn delete(&mut self, index: Option<usize>) -> Result<(Task, SaveOutcome), ActionError> {
        let removed = self.tasks.delete(index)?;
        tracing::info!(name = %removed.name, "task deleted");
        Ok((removed, self.commit()))
    }

    /// Rewrite the whole file from the in-memory list.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Codec`] or [`StoreError::Write`].
    pub fn persist(&self) -> Result<(), StoreError> {
        let text = codec::encode(self.tasks.tasks())?;
        fs::write(&self.path, text).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }

    /// Persist after a mutation, logging failures.
    pub fn commit(&self) -> SaveOutcome {
        match self.persist() {
            Ok(()) => SaveOutcome::Saved,
            Err(e) => {
                tracing::error!(error = %e, "failed to save task list");
                SaveOutcome::Failed(e)
            }
        }
    }
}
