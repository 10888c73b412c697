// Calendar-day helpers shared by the availability index, the range
// selector and the pricing engine. Dates are midnight-anchored
// `NaiveDate`s; time-of-day never enters the engine.

use chrono::{Days, NaiveDate};

/// Inclusive day sequence from `start` through `end`. A 3-night stay from
/// day 1 to day 4 yields days 1,2,3,4 — both endpoints are occupied, so a
/// new arrival on someone's departure day is impossible (same-day
/// turnover is deliberately forbidden).
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut days = Vec::new();
    let mut cursor = start;
    while cursor <= end {
        days.push(cursor);
        cursor = match cursor.checked_add_days(Days::new(1)) {
            Some(next) => next,
            None => break,
        };
    }
    days
}

/// Calendar-day difference `end - start`, clamped to zero.
pub fn nights_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days().max(0)
}

/// ISO calendar-date string, `YYYY-MM-DD`.
pub fn to_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Display form used across the site: `DD-MM-YYYY`.
pub fn format_display(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

/// Display form of a possibly half-open range, e.g. `15-07-2024 → 18-07-2024`.
pub fn format_display_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> String {
    match (start, end) {
        (Some(s), Some(e)) => format!("{} → {}", format_display(s), format_display(e)),
        (Some(s), None) => format_display(s),
        (None, Some(e)) => format_display(e),
        (None, None) => String::new(),
    }
}
