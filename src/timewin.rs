// Copyright (c) 2025 Ledgerline Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};

use crate::models::WeekWindow;

pub const SECS_PER_DAY: i64 = 86_400;

pub const DAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Inclusive Unix-second boundaries of the calendar week (Sunday through
/// Saturday) containing `reference + offset_weeks * 7 days`.
///
/// All week math is done on the UTC calendar, matching the weekday
/// derivation in [`weekday_index`] and in the SQL aggregation path.
/// `end_inclusive` is 23:59:59 of the Saturday, so a transaction stamped at
/// the last second of the week is still inside it.
pub fn week_window(reference: DateTime<Utc>, offset_weeks: i64) -> WeekWindow {
    let shifted = reference.date_naive() + Duration::days(offset_weeks * 7);
    let sunday = shifted - Duration::days(shifted.weekday().num_days_from_sunday() as i64);
    let start = sunday.and_time(NaiveTime::MIN).and_utc().timestamp();
    WeekWindow {
        start_inclusive: start,
        end_inclusive: start + 7 * SECS_PER_DAY - 1,
    }
}

/// Weekday bucket index (Sun=0 .. Sat=6) of a Unix timestamp, UTC calendar.
/// The epoch day, 1970-01-01, was a Thursday.
pub fn weekday_index(ts: i64) -> usize {
    (ts.div_euclid(SECS_PER_DAY) + 4).rem_euclid(7) as usize
}

/// Human-readable "Aug 17 - Aug 23" range for a window header.
pub fn window_label(window: &WeekWindow) -> String {
    let fmt = |ts: i64| {
        DateTime::<Utc>::from_timestamp(ts, 0)
            .map(|d| d.format("%b %d").to_string())
            .unwrap_or_else(|| ts.to_string())
    };
    format!(
        "{} - {}",
        fmt(window.start_inclusive),
        fmt(window.end_inclusive)
    )
}
