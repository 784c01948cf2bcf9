//! Optional decorative banner shown above the timer.
//!
//! The banner is a plain text file. It is never required: a missing or
//! unreadable file is reported once and the UI carries on without it.

use std::path::Path;

use pomodoro_core::error::ActionError;

/// Maximum number of banner lines kept.
pub const MAX_BANNER_LINES: usize = 8;

/// Load the banner at `path`.
///
/// Returns `Ok(None)` when no banner is configured. Lines beyond
/// [`MAX_BANNER_LINES`] are dropped.
///
/// # Errors
///
/// Returns [`ActionError::Resource`] if the file cannot be read.
pub fn load_banner(path: Option<&Path>) -> Result<Option<Vec<String>>, ActionError> {
    let Some(path) = path else {
        return Ok(None);
    };
    let text = std::fs::read_to_string(path).map_err(|e| {
        tracing::warn!(path = %path.display(), error = %e, "banner unavailable");
        ActionError::Resource(format!(
            "Failed to load banner {}: {e}",
            path.display()
        ))
    })?;
    let lines: Vec<String> = text
        .lines()
        .take(MAX_BANNER_LINES)
        .map(str::to_string)
        .collect();
    Ok(Some(lines))
}
