//! Application state and event handling.
//!
//! [`App`] owns the task store, the selection, a mirror of the countdown
//! last reported by the tick worker, the accumulator and the notice log.
//! Key handling returns a [`TimerCommand`] when the action has to go to
//! the worker; worker replies come back through
//! [`App::apply_timer_event`].

use std::collections::VecDeque;
use std::fmt::Write as _;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use pomodoro_core::countdown::{Accumulator, Completion, CountdownSpec, DEFAULT_BREAK_SECS, Snapshot};
use pomodoro_core::display::{format_mm_ss, split_minutes};
use pomodoro_core::error::ActionError;
use pomodoro_core::task::{Task, TaskId, parse_minutes};

use crate::store::{SaveOutcome, TaskStore};
use crate::timer::{TimerCommand, TimerEvent};

/// Maximum number of notices kept in the log.
pub const MAX_NOTICES: usize = 200;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Plain information.
    Info,
    /// Action refused, nothing changed.
    Warning,
    /// Bad input or a failed save.
    Error,
}

/// A line in the notice log.
#[derive(Debug, Clone)]
pub struct Notice {
    /// Formatted local time.
    pub timestamp: String,
    /// Severity.
    pub level: NoticeLevel,
    /// Short heading (e.g., "Task Complete").
    pub title: String,
    /// Message body.
    pub text: String,
}

/// Whether the task form adds a task or edits one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// Append a new task.
    Add,
    /// Replace the task at this index.
    Edit(usize),
}

/// Which form field receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// Task name.
    Name,
    /// Time limit in minutes.
    Minutes,
}

/// Name + minutes prompt. Nothing is committed until the form validates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    /// Add or edit.
    pub mode: FormMode,
    /// Name as typed.
    pub name: String,
    /// Minutes as typed.
    pub minutes: String,
    /// Focused field.
    pub field: FormField,
    /// Last validation message, shown inside the dialog.
    pub error: Option<String>,
}

impl TaskForm {
    fn add() -> Self {
        Self {
            mode: FormMode::Add,
            name: String::new(),
            minutes: String::new(),
            field: FormField::Name,
            error: None,
        }
    }

    fn edit(index: usize, task: &Task) -> Self {
        Self {
            mode: FormMode::Edit(index),
            name: task.name.clone(),
            minutes: task.minutes().to_string(),
            field: FormField::Name,
            error: None,
        }
    }

    /// Dialog title.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Add => "New Task",
            FormMode::Edit(_) => "Edit Task",
        }
    }

    const fn toggle_field(&mut self) {
        self.field = match self.field {
            FormField::Name => FormField::Minutes,
            FormField::Minutes => FormField::Name,
        };
    }

    const fn input_mut(&mut self) -> &mut String {
        match self.field {
            FormField::Name => &mut self.name,
            FormField::Minutes => &mut self.minutes,
        }
    }
}

/// A modal prompt. While one is open it receives every key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    /// Add/edit form.
    TaskForm(TaskForm),
    /// "Do you want to start a break?"
    ConfirmBreak {
        /// Break length in seconds.
        secs: u64,
    },
}

/// Main application state.
pub struct App {
    /// Task list and its file.
    pub store: TaskStore,
    /// Selected list index; `None` means no selection.
    pub selected: Option<usize>,
    /// Countdown as last reported by the tick worker.
    pub countdown: Snapshot,
    /// Seconds spent on completed tasks this session.
    pub accumulator: Accumulator,
    /// Notice log, oldest first.
    pub notices: VecDeque<Notice>,
    /// Open dialog, if any.
    pub dialog: Option<Dialog>,
    /// Optional banner lines.
    pub banner: Option<Vec<String>>,
    /// Whether the app should quit.
    pub should_quit: bool,
    pending_dialog: Option<Dialog>,
    /// Task sent to the worker whose `Started` reply has not arrived yet.
    pending_start: Option<TaskId>,
    break_secs: u64,
    timestamp_format: String,
}

impl App {
    /// Create an application around a restored store.
    #[must_use]
    pub fn new(store: TaskStore) -> Self {
        Self {
            store,
            selected: None,
            countdown: Snapshot::default(),
            accumulator: Accumulator::new(),
            notices: VecDeque::new(),
            dialog: None,
            banner: None,
            should_quit: false,
            pending_dialog: None,
            pending_start: None,
            break_secs: DEFAULT_BREAK_SECS,
            timestamp_format: "%H:%M:%S".to_string(),
        }
    }

    /// Set the break length offered after a task completes.
    #[must_use]
    pub const fn with_break_secs(mut self, secs: u64) -> Self {
        self.break_secs = secs;
        self
    }

    /// Set the notice timestamp format (chrono).
    #[must_use]
    pub fn with_timestamp_format(mut self, format: &str) -> Self {
        self.timestamp_format = format.to_string();
        self
    }

    /// Set the banner lines.
    #[must_use]
    pub fn with_banner(mut self, banner: Option<Vec<String>>) -> Self {
        self.banner = banner;
        self
    }

    /// The selected task, if the selection is valid.
    #[must_use]
    pub fn selected_task(&self) -> Option<&Task> {
        self.selected.and_then(|i| self.store.get(i))
    }

    /// Handle a key event.
    ///
    /// Returns `Some(TimerCommand)` when the action must be carried out by
    /// the tick worker.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<TimerCommand> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return None;
        }

        match self.dialog.take() {
            Some(Dialog::TaskForm(form)) => {
                self.handle_form_key(form, key);
                None
            }
            Some(Dialog::ConfirmBreak { secs }) => self.handle_confirm_key(secs, key),
            None => self.handle_main_key(key),
        }
    }

    /// Handle key event when no dialog is open.
    fn handle_main_key(&mut self, key: KeyEvent) -> Option<TimerCommand> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Char('a') => self.dialog = Some(Dialog::TaskForm(TaskForm::add())),
            KeyCode::Char('e') => self.open_edit_form(),
            KeyCode::Char('d') => self.delete_selected(),
            KeyCode::Char('s') | KeyCode::Enter => return self.start_selected(),
            KeyCode::Char('r') => return self.resume(),
            KeyCode::Char('p' | ' ') => return Some(TimerCommand::Stop),
            _ => {}
        }
        None
    }

    /// Handle key event while the task form is open.
    fn handle_form_key(&mut self, mut form: TaskForm, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                tracing::debug!("task form cancelled");
                self.close_dialog();
                return;
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => form.toggle_field(),
            KeyCode::Enter if form.field == FormField::Name => {
                if form.name.trim().is_empty() {
                    self.close_dialog();
                    return;
                }
                form.field = FormField::Minutes;
            }
            KeyCode::Enter => {
                self.submit_form(form);
                return;
            }
            KeyCode::Backspace => {
                form.input_mut().pop();
            }
            KeyCode::Char(c) => form.input_mut().push(c),
            _ => {}
        }
        self.dialog = Some(Dialog::TaskForm(form));
    }

    /// Validate the form and commit it to the store.
    ///
    /// On a validation failure the form stays open with the message and
    /// the store is untouched.
    fn submit_form(&mut self, mut form: TaskForm) {
        let name = form.name.trim().to_string();
        if name.is_empty() {
            self.close_dialog();
            return;
        }
        let result = parse_minutes(&form.minutes).and_then(|minutes| match form.mode {
            FormMode::Add => self.store.add(&name, minutes),
            FormMode::Edit(index) => self.store.edit(Some(index), &name, minutes),
        });
        match result {
            Ok(outcome) => {
                self.close_dialog();
                let done = match form.mode {
                    FormMode::Add => format!("Added '{name}'."),
                    FormMode::Edit(index) => format!("Updated task {}.", index + 1),
                };
                self.report_save(outcome, &done);
            }
            Err(err @ ActionError::Selection(_)) => {
                self.close_dialog();
                self.report(&err);
            }
            Err(err) => {
                form.error = Some(err.to_string());
                self.report(&err);
                self.dialog = Some(Dialog::TaskForm(form));
            }
        }
    }

    /// Handle key event while the break offer is open.
    fn handle_confirm_key(&mut self, secs: u64, key: KeyEvent) -> Option<TimerCommand> {
        match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => {
                self.close_dialog();
                Some(TimerCommand::Start(CountdownSpec::break_of(secs)))
            }
            KeyCode::Char('n' | 'N') | KeyCode::Esc => {
                self.close_dialog();
                self.push_notice(NoticeLevel::Info, "Break Time", "Break skipped.");
                None
            }
            _ => {
                self.dialog = Some(Dialog::ConfirmBreak { secs });
                None
            }
        }
    }

    fn open_edit_form(&mut self) {
        match self.selected.zip(self.selected_task()) {
            Some((index, task)) => {
                self.dialog = Some(Dialog::TaskForm(TaskForm::edit(index, task)));
            }
            None => self.report(&ActionError::Selection(
                "Please select a task to edit.".to_string(),
            )),
        }
    }

    fn delete_selected(&mut self) {
        if let Some(task) = self.selected_task()
            && self.is_timing(task.id)
        {
            self.report(&ActionError::StateConflict(
                "Stop the timer before deleting the running task.".to_string(),
            ));
            return;
        }
        match self.store.delete(self.selected) {
            Ok((task, outcome)) => {
                self.selected = match self.selected {
                    Some(_) if self.store.is_empty() => None,
                    Some(i) => Some(i.min(self.store.len() - 1)),
                    None => None,
                };
                self.report_save(outcome, &format!("Deleted '{}'.", task.name));
            }
            Err(err) => self.report(&err),
        }
    }

    fn start_selected(&mut self) -> Option<TimerCommand> {
        if let Some(task) = self.selected_task() {
            let spec = CountdownSpec::for_task(task);
            if !self.countdown.is_running() {
                tracing::debug!(task = %task.id, "start requested");
                self.pending_start = Some(task.id);
            }
            return Some(TimerCommand::Start(spec));
        }
        self.report(&ActionError::Selection(
            "Please select a task to start.".to_string(),
        ));
        None
    }

    fn resume(&mut self) -> Option<TimerCommand> {
        if !self.countdown.can_resume() {
            self.report(&ActionError::StateConflict(
                "The timer is already running or no task is paused.".to_string(),
            ));
            return None;
        }
        if let Some(id) = self.countdown.task_id()
            && !self.store.contains(id)
        {
            self.report(&ActionError::Selection("No task to resume.".to_string()));
            return None;
        }
        self.pending_start = self.countdown.task_id();
        Some(TimerCommand::Resume)
    }

    /// Whether the task with `id` is running or about to run.
    fn is_timing(&self, id: TaskId) -> bool {
        self.pending_start == Some(id)
            || (self.countdown.is_running() && self.countdown.task_id() == Some(id))
    }

    /// Apply an event from the tick worker.
    pub fn apply_timer_event(&mut self, event: TimerEvent) {
        if matches!(event, TimerEvent::Started(_) | TimerEvent::Rejected(_)) {
            self.pending_start = None;
        }
        match event {
            TimerEvent::Started(snapshot) => {
                self.push_notice(
                    NoticeLevel::Info,
                    "Timer",
                    &format!("Started '{}' ({}).", snapshot.label, snapshot.readout()),
                );
                self.countdown = snapshot;
            }
            TimerEvent::Tick(snapshot) => self.countdown = snapshot,
            TimerEvent::Stopped(snapshot) => {
                let (minutes, seconds) = split_minutes(snapshot.remaining);
                self.push_notice(
                    NoticeLevel::Info,
                    "Timer Stopped",
                    &format!(
                        "Timer stopped with {minutes} minutes and {seconds} seconds remaining."
                    ),
                );
                self.countdown = snapshot;
            }
            TimerEvent::Completed(completion) => self.on_completed(&completion),
            TimerEvent::Rejected(err) => self.report(&err),
        }
    }

    /// Credit the accumulator, save, and offer a break after a task.
    fn on_completed(&mut self, completion: &Completion) {
        if self.accumulator.record(completion) {
            let outcome = self.store.commit();
            self.report_save(outcome, "");
            self.push_notice(
                NoticeLevel::Info,
                "Task Complete",
                &format!("Task '{}' completed!", completion.label),
            );
            self.open_dialog(Dialog::ConfirmBreak {
                secs: self.break_secs,
            });
        } else {
            self.push_notice(NoticeLevel::Info, "Break Over", "Break finished.");
        }
    }

    fn open_dialog(&mut self, dialog: Dialog) {
        if self.dialog.is_none() {
            self.dialog = Some(dialog);
        } else {
            self.pending_dialog = Some(dialog);
        }
    }

    fn close_dialog(&mut self) {
        self.dialog = self.pending_dialog.take();
    }

    /// Show an action error to the user.
    pub fn report(&mut self, err: &ActionError) {
        let level = match err {
            ActionError::Validation(_) | ActionError::Resource(_) => NoticeLevel::Error,
            ActionError::Selection(_) | ActionError::StateConflict(_) => NoticeLevel::Warning,
        };
        tracing::debug!(error = %err, "action refused");
        self.push_notice(level, err.title(), &err.to_string());
    }

    /// Show the result of a store mutation. `done` is shown on success
    /// unless empty.
    fn report_save(&mut self, outcome: SaveOutcome, done: &str) {
        match outcome {
            SaveOutcome::Unchanged => {}
            SaveOutcome::Saved => {
                if !done.is_empty() {
                    self.push_notice(NoticeLevel::Info, "Tasks", done);
                }
            }
            SaveOutcome::Failed(err) => {
                self.push_notice(NoticeLevel::Error, "Save Failed", &err.to_string());
            }
        }
    }

    /// Append a timestamped notice, dropping the oldest past [`MAX_NOTICES`].
    pub fn push_notice(&mut self, level: NoticeLevel, title: &str, text: &str) {
        let mut timestamp = String::new();
        if write!(
            timestamp,
            "{}",
            chrono::Local::now().format(&self.timestamp_format)
        )
        .is_err()
        {
            timestamp = "--:--".to_string();
        }
        self.notices.push_back(Notice {
            timestamp,
            level,
            title: title.to_string(),
            text: text.to_string(),
        });
        while self.notices.len() > MAX_NOTICES {
            self.notices.pop_front();
        }
    }

    /// Total focused time as `MM:SS`.
    #[must_use]
    pub fn focused_readout(&self) -> String {
        format_mm_ss(self.accumulator.total_secs())
    }

    fn select_next(&mut self) {
        if self.store.is_empty() {
            return;
        }
        let last = self.store.len() - 1;
        self.selected = Some(self.selected.map_or(0, |i| (i + 1).min(last)));
    }

    fn select_prev(&mut self) {
        if self.store.is_empty() {
            return;
        }
        self.selected = Some(self.selected.map_or(0, |i| i.saturating_sub(1)));
    }
}
