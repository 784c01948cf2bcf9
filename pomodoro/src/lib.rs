//! `pomodoro`: terminal Pomodoro focus timer library.

pub mod app;
pub mod banner;
pub mod config;
pub mod store;
pub mod timer;
pub mod ui;
