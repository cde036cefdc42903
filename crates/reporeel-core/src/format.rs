// Display helpers for repository cards
use chrono::{DateTime, Utc};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Abbreviate counts: 999 -> "999", 1500 -> "1.5K", 2500000 -> "2.5M"
pub fn format_number(num: u64) -> String {
    if num >= 1_000_000 {
        format!("{:.1}M", num as f64 / 1_000_000.0)
    } else if num >= 1_000 {
        format!("{:.1}K", num as f64 / 1_000.0)
    } else {
        num.to_string()
    }
}

/// Coarse "time since" label.
///
/// Partial days round up. Months are 30 days and years 365, floored, and the
/// plural is never corrected ("1 years ago" is intended).
pub fn format_relative_date(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff_ms = (now - then).num_milliseconds().abs();
    let days = (diff_ms + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY;

    if days == 1 {
        "1 day ago".to_string()
    } else if days < 30 {
        format!("{} days ago", days)
    } else if days < 365 {
        format!("{} months ago", days / 30)
    } else {
        format!("{} years ago", days / 365)
    }
}

/// [`format_relative_date`] against the current time
pub fn time_since(then: DateTime<Utc>) -> String {
    format_relative_date(then, Utc::now())
}
