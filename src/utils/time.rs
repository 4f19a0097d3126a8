//! Duration formatting for console output.

use chrono::Duration;

/// `8.5` → `8h 30m`
pub fn format_hours(hours: f64) -> String {
    let total_minutes = (hours.max(0.0) * 60.0).round() as i64;
    format!("{}h {:02}m", total_minutes / 60, total_minutes % 60)
}

/// Running timer shown by `status`: `HH:MM:SS`.
pub fn format_elapsed(d: Duration) -> String {
    let secs = d.num_seconds().max(0);
    format!(
        "{:02}:{:02}:{:02}",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}
