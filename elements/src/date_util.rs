// Copyright (c) 2025 Steven Rosenthal smr@dt3.org
// See LICENSE file in root directory for license terms.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Returns every calendar date from `start` through `end`, inclusive. The time
/// of day of both arguments is ignored. Empty if `end` falls on an earlier
/// date than `start`.
pub fn date_range(start: &NaiveDateTime, end: &NaiveDateTime) -> Vec<NaiveDate> {
    let (first, last) = (start.date(), end.date());
    first.iter_days().take_while(|day| *day <= last).collect()
}

/// 23:59:59 on the calendar day of `timestamp`.
pub fn end_of_day(timestamp: &NaiveDateTime) -> NaiveDateTime {
    // 23:59:59 is always a valid time.
    timestamp.date().and_time(
        NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN))
}

// mod tests.
