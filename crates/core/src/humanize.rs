//! Compact human-readable formatting helpers

use std::time::Duration;

/// Format milliseconds into a compact elapsed time
///
/// ```
/// use termkit_core::format_elapsed;
///
/// assert_eq!(format_elapsed(42_000), "42s");
/// assert_eq!(format_elapsed(150_000), "2m 30s");
/// assert_eq!(format_elapsed(3_900_000), "1h 5m");
/// ```
pub fn format_elapsed(ms: u64) -> String {
    let seconds = ms / 1000;
    let minutes = seconds / 60;
    let hours = minutes / 60;

    if hours > 0 {
        let remaining_minutes = minutes % 60;
        return if remaining_minutes > 0 {
            format!("{hours}h {remaining_minutes}m")
        } else {
            format!("{hours}h")
        };
    }

    if minutes > 0 {
        let remaining_seconds = seconds % 60;
        return if remaining_seconds > 0 {
            format!("{minutes}m {remaining_seconds}s")
        } else {
            format!("{minutes}m")
        };
    }

    format!("{seconds}s")
}

/// [`format_elapsed`] for a `Duration`, saturating at `u64::MAX` milliseconds
pub fn format_duration(duration: Duration) -> String {
    format_elapsed(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}

/// `[current/total]`
pub fn format_count(current: u64, total: u64) -> String {
    format!("[{current}/{total}]")
}

/// Whole percentage, rounded down; `0%` when `total` is zero
pub fn format_percent(current: u64, total: u64) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    format!("{}%", current.saturating_mul(100) / total)
}

/// Dollar amount with extra precision below one cent
pub fn format_cost(dollars: f64) -> String {
    if dollars == 0.0 {
        return "$0.00".to_string();
    }
    if dollars < 0.01 {
        return format!("${dollars:.4}");
    }
    format!("${dollars:.2}")
}
