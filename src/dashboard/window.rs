//! The date ranges the dashboard aggregates over.

use std::ops::RangeInclusive;

use time::{Date, Duration};

/// The days of the current calendar month up to and including `today`.
pub fn current_month(today: Date) -> RangeInclusive<Date> {
    today.replace_day(1).unwrap_or(today)..=today
}

/// The last `days` days ending on and including `today`.
///
/// Returns `None` for a window of zero days. A window reaching back past the earliest supported
/// date starts at [Date::MIN].
pub fn trailing_days(today: Date, days: u32) -> Option<RangeInclusive<Date>> {
    if days == 0 {
        return None;
    }

    let start = today
        .checked_sub(Duration::days(i64::from(days) - 1))
        .unwrap_or(Date::MIN);

    Some(start..=today)
}
