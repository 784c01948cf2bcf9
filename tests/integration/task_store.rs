//! Integration tests for task persistence.
//!
//! Tests that the task file survives a restart, that a first run without
//! a file starts empty, and that an unreadable file is refused rather
//! than overwritten.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::fs;

use pomodoro::store::{SaveOutcome, StoreError, TaskStore};
use pomodoro_core::codec;
use pomodoro_core::error::ActionError;
use pomodoro_core::task::MAX_TASK_NAME_LENGTH;

// =============================================================================
// First run
// =============================================================================

#[test]
fn first_run_without_file_is_empty_and_creates_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.json");

    let store = TaskStore::open(&path, MAX_TASK_NAME_LENGTH).unwrap();

    assert!(store.is_empty());
    assert!(store.list().is_empty());
    assert!(!path.exists());
}

// =============================================================================
// Restart round trip
// =============================================================================

#[test]
fn tasks_survive_restart_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.json");

    {
        let mut store = TaskStore::open(&path, MAX_TASK_NAME_LENGTH).unwrap();
        assert!(matches!(store.add("Write report", 25), Ok(SaveOutcome::Saved)));
        assert!(matches!(store.add("Review PR", 15), Ok(SaveOutcome::Saved)));
        assert!(matches!(store.add("Email", 5), Ok(SaveOutcome::Saved)));
        store.edit(Some(1), "Review PRs", 20).unwrap();
        store.delete(Some(2)).unwrap();
    }

    let store = TaskStore::open(&path, MAX_TASK_NAME_LENGTH).unwrap();
    assert_eq!(store.list(), vec!["1. Write report", "2. Review PRs"]);
    assert_eq!(store.get(0).unwrap().budget_secs, 1500);
    assert_eq!(store.get(1).unwrap().budget_secs, 1200);
}

#[test]
fn file_is_array_of_name_seconds_pairs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.json");
    let mut store = TaskStore::open(&path, MAX_TASK_NAME_LENGTH).unwrap();
    store.add("Write report", 25).unwrap();
    store.add("Review PR", 15).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text, r#"[["Write report",1500],["Review PR",900]]"#);

    let decoded = codec::decode(&text).unwrap();
    assert_eq!(decoded.len(), 2);
    assert_eq!(decoded[1].name, "Review PR");
}

#[test]
fn hand_written_file_is_restored() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.json");
    fs::write(&path, "[\n  [\"Deep work\", 3000],\n  [\"Stretch\", 90]\n]\n").unwrap();

    let store = TaskStore::open(&path, MAX_TASK_NAME_LENGTH).unwrap();

    assert_eq!(store.list(), vec!["1. Deep work", "2. Stretch"]);
    assert_eq!(store.get(1).unwrap().budget_secs, 90);
}

#[test]
fn restored_tasks_get_fresh_ids() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.json");
    fs::write(&path, r#"[["Same",60],["Same",60]]"#).unwrap();

    let store = TaskStore::open(&path, MAX_TASK_NAME_LENGTH).unwrap();

    assert_ne!(store.get(0).unwrap().id, store.get(1).unwrap().id);
}

// =============================================================================
// Failure paths
// =============================================================================

#[test]
fn corrupt_file_is_refused_and_left_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.json");
    fs::write(&path, "not json at all").unwrap();

    let err = TaskStore::open(&path, MAX_TASK_NAME_LENGTH).err().unwrap();

    assert!(matches!(err, StoreError::Corrupt { .. }));
    assert_eq!(fs::read_to_string(&path).unwrap(), "not json at all");
}

#[test]
fn rejected_edit_does_not_touch_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.json");
    let mut store = TaskStore::open(&path, MAX_TASK_NAME_LENGTH).unwrap();
    store.add("Write report", 25).unwrap();
    let before = fs::read_to_string(&path).unwrap();

    assert!(matches!(
        store.edit(Some(5), "Nope", 10),
        Err(ActionError::Selection(_))
    ));
    assert!(matches!(
        store.edit(None, "Nope", 10),
        Err(ActionError::Selection(_))
    ));

    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}
