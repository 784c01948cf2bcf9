//! Countdown readout helpers.

/// How close a countdown is to running out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    /// More than half of the time is left.
    Nominal,
    /// More than a fifth and at most half is left.
    Warning,
    /// A fifth or less is left.
    Critical,
}

impl Urgency {
    /// Classify `remaining` against `total`.
    ///
    /// Uses integer cross-multiplication so the 50 % and 20 % boundaries
    /// are exact: exactly half left is `Warning`, exactly a fifth left is
    /// `Critical`. A zero total is `Critical`.
    #[must_use]
    pub const fn from_fraction(remaining: u64, total: u64) -> Self {
        let remaining = remaining as u128;
        let total = total as u128;
        if remaining * 2 > total {
            Self::Nominal
        } else if remaining * 5 > total {
            Self::Warning
        } else {
            Self::Critical
        }
    }
}

/// Format seconds as `MM:SS`.
///
/// Both fields are zero-padded to two digits. Minutes are not wrapped,
/// so two hours reads `120:00`.
#[must_use]
pub fn format_mm_ss(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Split seconds into whole minutes and leftover seconds.
#[must_use]
pub const fn split_minutes(secs: u64) -> (u64, u64) {
    (secs / 60, secs % 60)
}
