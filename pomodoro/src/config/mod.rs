//! Configuration system for the Pomodoro timer.
//!
//! Supports layered configuration with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`~/.config/pomodoro/config.toml`)
//! 4. Compiled defaults
//!
//! Missing config file is not an error (defaults are used). An explicit
//! `--config` path that doesn't exist is an error.

use std::path::PathBuf;
use std::time::Duration;

use pomodoro_core::countdown::DEFAULT_BREAK_SECS;
use pomodoro_core::task::MAX_TASK_NAME_LENGTH;

use crate::timer::TimerConfig;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

/// Top-level TOML config file structure.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    storage: StorageFileConfig,
    timer: TimerFileConfig,
    ui: UiFileConfig,
}

/// `[storage]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct StorageFileConfig {
    tasks_file: Option<PathBuf>,
}

/// `[timer]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct TimerFileConfig {
    break_minutes: Option<u64>,
    tick_ms: Option<u64>,
    channel_capacity: Option<usize>,
}

/// `[ui]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct UiFileConfig {
    poll_timeout_ms: Option<u64>,
    timestamp_format: Option<String>,
    max_task_name_len: Option<usize>,
    banner_path: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Resolved configuration (concrete types, all fields populated)
// ---------------------------------------------------------------------------

/// Fully resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // -- Storage --
    /// Task file, relative paths resolve against the working directory.
    pub tasks_file: PathBuf,

    // -- Timer --
    /// Length of the break offered after a task completes.
    pub break_secs: u64,
    /// Countdown tick period.
    pub tick: Duration,
    /// Capacity of the timer command/event channels.
    pub channel_capacity: usize,

    // -- UI --
    /// Poll timeout for the TUI event loop.
    pub poll_timeout: Duration,
    /// Notice timestamp format string (chrono).
    pub timestamp_format: String,
    /// Maximum task name length in characters.
    pub max_task_name_len: usize,
    /// Optional decorative banner file.
    pub banner_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tasks_file: PathBuf::from("tasks.json"),
            break_secs: DEFAULT_BREAK_SECS,
            tick: Duration::from_secs(1),
            channel_capacity: 64,
            poll_timeout: Duration::from_millis(50),
            timestamp_format: "%H:%M:%S".to_string(),
            max_task_name_len: MAX_TASK_NAME_LENGTH,
            banner_path: None,
        }
    }
}

impl AppConfig {
    /// Load configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// If `--config` is given and the file does not exist, returns an
    /// error. If no `--config` is given, the default path
    /// (`~/.config/pomodoro/config.toml`) is tried and silently ignored if
    /// missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config file cannot be read or parsed.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Ok(Self::resolve(cli, &file))
    }

    /// Resolve an `AppConfig` from CLI args and a parsed config file.
    ///
    /// Priority: CLI > file > default. This is separated from `load()` to
    /// enable unit testing without CLI parsing.
    #[must_use]
    fn resolve(cli: &CliArgs, file: &ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            tasks_file: cli
                .tasks_file
                .clone()
                .or_else(|| file.storage.tasks_file.clone())
                .unwrap_or(defaults.tasks_file),
            break_secs: cli
                .break_minutes
                .or(file.timer.break_minutes)
                .map_or(defaults.break_secs, |m| m.saturating_mul(60)),
            tick: file
                .timer
                .tick_ms
                .filter(|ms| *ms > 0)
                .map_or(defaults.tick, Duration::from_millis),
            channel_capacity: file
                .timer
                .channel_capacity
                .filter(|c| *c > 0)
                .unwrap_or(defaults.channel_capacity),
            poll_timeout: file
                .ui
                .poll_timeout_ms
                .map_or(defaults.poll_timeout, Duration::from_millis),
            timestamp_format: cli
                .timestamp_format
                .clone()
                .or_else(|| file.ui.timestamp_format.clone())
                .unwrap_or(defaults.timestamp_format),
            max_task_name_len: file
                .ui
                .max_task_name_len
                .unwrap_or(defaults.max_task_name_len),
            banner_path: cli
                .banner
                .clone()
                .or_else(|| file.ui.banner_path.clone()),
        }
    }

    /// Build the tick worker configuration.
    #[must_use]
    pub const fn to_timer_config(&self) -> TimerConfig {
        TimerConfig {
            tick: self.tick,
            channel_capacity: self.channel_capacity,
        }
    }
}

/// CLI arguments parsed by clap.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Terminal-native Pomodoro focus timer")]
pub struct CliArgs {
    /// Task file to load and save (default: `tasks.json`).
    #[arg(short, long, env = "POMODORO_TASKS_FILE")]
    pub tasks_file: Option<PathBuf>,

    /// Path to config file (default: `~/.config/pomodoro/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Break length in minutes offered after each task.
    #[arg(long)]
    pub break_minutes: Option<u64>,

    /// Notice timestamp format (chrono format string).
    #[arg(long)]
    pub timestamp_format: Option<String>,

    /// Text file shown as a banner above the timer.
    #[arg(long)]
    pub banner: Option<PathBuf>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "POMODORO_LOG")]
    pub log_level: String,

    /// Path to log file (default: `$TMPDIR/pomodoro.log`).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Load and parse a TOML config file.
///
/// If `explicit_path` is `Some`, the file must exist (error if not).
/// If `explicit_path` is `None`, the default path is tried and missing file
/// is treated as empty config.
fn load_config_file(explicit_path: Option<&std::path::Path>) -> Result<ConfigFile, ConfigError> {
    let path = if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    } else {
        let Some(config_dir) = dirs::config_dir() else {
            return Ok(ConfigFile::default());
        };
        config_dir.join("pomodoro").join("config.toml")
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
