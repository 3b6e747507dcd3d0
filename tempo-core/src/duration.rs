use time::PrimitiveDateTime;

use crate::types::TimeEntry;

/// Whole minutes between two timestamps, floored and clamped at zero so a
/// mid-edit inverted range never renders as a negative duration.
pub fn elapsed_minutes(start: PrimitiveDateTime, end: PrimitiveDateTime) -> i64 {
    (end - start).whole_minutes().max(0)
}

/// Render minutes as a compact label: `45m`, `3h`, `3h 45m`. Zero or less
/// renders the `0h 0m` sentinel.
pub fn format_minutes(minutes: i64) -> String {
    if minutes <= 0 {
        return "0h 0m".to_string();
    }
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}

/// Elapsed label between two timestamps.
pub fn format_duration(start: PrimitiveDateTime, end: PrimitiveDateTime) -> String {
    format_minutes(elapsed_minutes(start, end))
}

/// Sum of row durations in minutes. A list total is the formatter applied
/// to this sum, never a re-parse of the per-row labels.
pub fn total_minutes<'a, I>(entries: I) -> i64
where
    I: IntoIterator<Item = &'a TimeEntry>,
{
    entries
        .into_iter()
        .map(|e| elapsed_minutes(e.start_date_time, e.end_date_time))
        .sum()
}
