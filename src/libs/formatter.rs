//! Human readable durations.
//!
//! Durations are whole seconds everywhere in the core. For display they are
//! rendered as `1h 30m`, `2m 5s` and so on, dropping zero components; a zero
//! duration renders as an em dash so empty table cells stay visible.

pub const EMPTY_DURATION: &str = "—";

/// Formats seconds as `Xh Ym Zs`, omitting zero parts.
///
/// ```rust
/// use hours::libs::formatter::format_duration;
///
/// assert_eq!(format_duration(5400), "1h 30m");
/// assert_eq!(format_duration(30), "30s");
/// assert_eq!(format_duration(0), "—");
/// ```
pub fn format_duration(seconds: u64) -> String {
    if seconds == 0 {
        return EMPTY_DURATION.to_string();
    }
    let hours = seconds / 3600;
    let minutes = seconds % 3600 / 60;
    let secs = seconds % 60;

    let mut parts = Vec::with_capacity(3);
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 {
        parts.push(format!("{}m", minutes));
    }
    if secs > 0 {
        parts.push(format!("{}s", secs));
    }
    parts.join(" ")
}

/// Formats seconds as decimal hours with two places, for spreadsheets.
pub fn format_hours(seconds: u64) -> String {
    format!("{:.2}", seconds as f64 / 3600.0)
}

/// Elapsed time of a running session as `HH:MM:SS`.
pub fn format_elapsed(seconds: u64) -> String {
    format!("{:02}:{:02}:{:02}", seconds / 3600, seconds % 3600 / 60, seconds % 60)
}
