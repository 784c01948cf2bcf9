//! Integration tests for key-driven task management.
//!
//! Tests that `App::handle_key_event` drives the add/edit/delete prompts,
//! that cancelling leaves the list and file untouched, and that actions
//! without a selection are refused with a notice.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::fs;
use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tempfile::TempDir;

use pomodoro::app::{App, Dialog, FormField, FormMode, NoticeLevel};
use pomodoro::store::TaskStore;
use pomodoro::timer::TimerCommand;

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_key_event(key(KeyCode::Char(c)));
    }
}

fn make_app() -> (TempDir, PathBuf, App) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.json");
    let store = TaskStore::open(&path, 256).unwrap();
    (dir, path, App::new(store))
}

fn add(app: &mut App, name: &str, minutes: &str) {
    app.handle_key_event(key(KeyCode::Char('a')));
    type_text(app, name);
    app.handle_key_event(key(KeyCode::Enter));
    type_text(app, minutes);
    app.handle_key_event(key(KeyCode::Enter));
}

fn last_text(app: &App) -> &str {
    &app.notices.back().unwrap().text
}

// =============================================================================
// Add
// =============================================================================

#[test]
fn add_walks_name_then_minutes() {
    let (_dir, path, mut app) = make_app();

    app.handle_key_event(key(KeyCode::Char('a')));
    let Some(Dialog::TaskForm(form)) = &app.dialog else {
        panic!("add should open the form");
    };
    assert_eq!(form.mode, FormMode::Add);
    assert_eq!(form.field, FormField::Name);

    type_text(&mut app, "Write report");
    app.handle_key_event(key(KeyCode::Enter));
    let Some(Dialog::TaskForm(form)) = &app.dialog else {
        panic!("form should stay open for minutes");
    };
    assert_eq!(form.field, FormField::Minutes);

    type_text(&mut app, "25");
    app.handle_key_event(key(KeyCode::Enter));

    assert!(app.dialog.is_none());
    assert_eq!(app.store.list(), vec!["1. Write report"]);
    assert_eq!(fs::read_to_string(&path).unwrap(), r#"[["Write report",1500]]"#);
}

#[test]
fn letters_in_minutes_are_rejected() {
    let (_dir, path, mut app) = make_app();
    add(&mut app, "Write report", "abc");

    assert!(matches!(app.dialog, Some(Dialog::TaskForm(_))));
    assert_eq!(
        last_text(&app),
        "Please enter a valid number for the time limit."
    );
    assert!(app.store.is_empty());
    assert!(!path.exists());
}

#[test]
fn zero_minutes_is_rejected() {
    let (_dir, path, mut app) = make_app();
    add(&mut app, "Write report", "0");

    assert!(matches!(app.dialog, Some(Dialog::TaskForm(_))));
    assert_eq!(app.notices.back().unwrap().level, NoticeLevel::Error);
    assert!(app.store.is_empty());
    assert!(!path.exists());
}

#[test]
fn cancelled_add_changes_nothing() {
    let (_dir, path, mut app) = make_app();
    add(&mut app, "Keep", "5");
    let before = fs::read_to_string(&path).unwrap();

    app.handle_key_event(key(KeyCode::Char('a')));
    type_text(&mut app, "Discard me");
    app.handle_key_event(key(KeyCode::Esc));

    assert!(app.dialog.is_none());
    assert_eq!(app.store.list(), vec!["1. Keep"]);
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

// =============================================================================
// Edit
// =============================================================================

#[test]
fn edit_replaces_in_place() {
    let (_dir, path, mut app) = make_app();
    add(&mut app, "One", "1");
    add(&mut app, "Two", "2");
    add(&mut app, "Three", "3");

    app.handle_key_event(key(KeyCode::Down));
    app.handle_key_event(key(KeyCode::Char('j')));
    assert_eq!(app.selected, Some(1));

    app.handle_key_event(key(KeyCode::Char('e')));
    for _ in 0.."Two".len() {
        app.handle_key_event(key(KeyCode::Backspace));
    }
    type_text(&mut app, "Deux");
    app.handle_key_event(key(KeyCode::Enter));
    app.handle_key_event(key(KeyCode::Backspace));
    type_text(&mut app, "7");
    app.handle_key_event(key(KeyCode::Enter));

    assert_eq!(app.store.list(), vec!["1. One", "2. Deux", "3. Three"]);
    assert_eq!(app.store.get(1).unwrap().budget_secs, 420);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        r#"[["One",60],["Deux",420],["Three",180]]"#
    );
}

#[test]
fn cancelled_edit_changes_nothing() {
    let (_dir, _path, mut app) = make_app();
    add(&mut app, "One", "1");
    app.selected = Some(0);

    app.handle_key_event(key(KeyCode::Char('e')));
    type_text(&mut app, " more");
    app.handle_key_event(key(KeyCode::Esc));

    assert_eq!(app.store.list(), vec!["1. One"]);
    assert_eq!(app.store.get(0).unwrap().budget_secs, 60);
}

// =============================================================================
// Delete and selection
// =============================================================================

#[test]
fn delete_without_selection_warns() {
    let (_dir, _path, mut app) = make_app();
    add(&mut app, "One", "1");

    app.handle_key_event(key(KeyCode::Char('d')));

    assert_eq!(app.store.len(), 1);
    assert_eq!(last_text(&app), "Please select a task to delete.");
    assert_eq!(app.notices.back().unwrap().level, NoticeLevel::Warning);
}

#[test]
fn delete_removes_selected_and_saves() {
    let (_dir, path, mut app) = make_app();
    add(&mut app, "One", "1");
    add(&mut app, "Two", "2");
    app.selected = Some(0);

    app.handle_key_event(key(KeyCode::Char('d')));

    assert_eq!(app.store.list(), vec!["1. Two"]);
    assert_eq!(app.selected, Some(0));
    assert_eq!(fs::read_to_string(&path).unwrap(), r#"[["Two",120]]"#);
}

#[test]
fn selection_stays_in_bounds() {
    let (_dir, _path, mut app) = make_app();
    app.handle_key_event(key(KeyCode::Down));
    assert_eq!(app.selected, None);

    add(&mut app, "One", "1");
    add(&mut app, "Two", "2");
    for _ in 0..5 {
        app.handle_key_event(key(KeyCode::Down));
    }
    assert_eq!(app.selected, Some(1));
    for _ in 0..5 {
        app.handle_key_event(key(KeyCode::Char('k')));
    }
    assert_eq!(app.selected, Some(0));
}

// =============================================================================
// Timer keys
// =============================================================================

#[test]
fn timer_keys_produce_commands() {
    let (_dir, _path, mut app) = make_app();
    add(&mut app, "One", "1");
    app.selected = Some(0);

    assert!(matches!(
        app.handle_key_event(key(KeyCode::Char('s'))),
        Some(TimerCommand::Start(_))
    ));
    assert!(matches!(
        app.handle_key_event(key(KeyCode::Char(' '))),
        Some(TimerCommand::Stop)
    ));
    assert!(matches!(
        app.handle_key_event(key(KeyCode::Char('p'))),
        Some(TimerCommand::Stop)
    ));
}

#[test]
fn keys_go_to_open_form_not_main_bindings() {
    let (_dir, _path, mut app) = make_app();
    app.handle_key_event(key(KeyCode::Char('a')));
    type_text(&mut app, "qds");

    assert!(!app.should_quit);
    let Some(Dialog::TaskForm(form)) = &app.dialog else {
        panic!("form should still be open");
    };
    assert_eq!(form.name, "qds");
}
