//! Date/time formatting for post timestamps.

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Display format used on the board.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a stored UTC timestamp in the given timezone.
///
/// Accepts RFC3339 and SQLite `datetime('now')` output. Returns the input
/// unchanged when either the timezone or the timestamp can't be parsed.
pub fn format_datetime(datetime_str: &str, timezone: &str, format: &str) -> String {
    let tz: Tz = match timezone.parse() {
        Ok(tz) => tz,
        Err(_) => return datetime_str.to_string(),
    };

    let utc = if let Ok(dt) = DateTime::parse_from_rfc3339(datetime_str) {
        dt.with_timezone(&Utc)
    } else if let Ok(naive) = NaiveDateTime::parse_from_str(datetime_str, "%Y-%m-%d %H:%M:%S") {
        naive.and_utc()
    } else {
        return datetime_str.to_string();
    };

    utc.with_timezone(&tz).format(format).to_string()
}

/// Format a stored timestamp with [`DISPLAY_FORMAT`].
pub fn format_post_time(datetime_str: &str, timezone: &str) -> String {
    format_datetime(datetime_str, timezone, DISPLAY_FORMAT)
}
