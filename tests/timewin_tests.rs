// Copyright (c) 2025 Ledgerline Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{TimeZone, Utc};
use ledgerline::timewin::{SECS_PER_DAY, week_window, weekday_index, window_label};

#[test]
fn window_spans_seven_days_and_starts_sunday() {
    for day in 1..=28 {
        let reference = Utc.with_ymd_and_hms(2025, 8, day, 15, 30, 0).unwrap();
        let w = week_window(reference, 0);
        assert_eq!(w.end_inclusive - w.start_inclusive + 1, 7 * SECS_PER_DAY);
        assert_eq!(weekday_index(w.start_inclusive), 0, "day {}", day);
        assert_eq!(weekday_index(w.end_inclusive), 6, "day {}", day);
        assert!(w.contains(reference.timestamp()));
    }
}

#[test]
fn known_week_boundaries() {
    // 2025-08-20 is a Wednesday; its week is Sun Aug 17 .. Sat Aug 23.
    let reference = Utc.with_ymd_and_hms(2025, 8, 20, 12, 0, 0).unwrap();
    let w = week_window(reference, 0);
    assert_eq!(
        w.start_inclusive,
        Utc.with_ymd_and_hms(2025, 8, 17, 0, 0, 0).unwrap().timestamp()
    );
    assert_eq!(
        w.end_inclusive,
        Utc.with_ymd_and_hms(2025, 8, 23, 23, 59, 59)
            .unwrap()
            .timestamp()
    );
    assert_eq!(window_label(&w), "Aug 17 - Aug 23");
}

#[test]
fn offset_shifts_by_whole_weeks_and_round_trips() {
    let reference = Utc.with_ymd_and_hms(2025, 8, 20, 12, 0, 0).unwrap();
    for offset in [-3i64, -1, 0, 2, 5] {
        let here = week_window(reference, offset);
        let next = week_window(reference, offset + 1);
        assert_eq!(next.start_inclusive - here.start_inclusive, 7 * SECS_PER_DAY);
        assert_eq!(next.end_inclusive - here.end_inclusive, 7 * SECS_PER_DAY);
        // navigating forward then back lands on the exact original window
        assert_eq!(week_window(reference, offset + 1 - 1), here);
    }
}

#[test]
fn weekday_index_matches_known_dates() {
    // the Unix epoch was a Thursday
    assert_eq!(weekday_index(0), 4);
    let sunday = Utc.with_ymd_and_hms(2025, 8, 17, 0, 0, 0).unwrap();
    assert_eq!(weekday_index(sunday.timestamp()), 0);
    let saturday = Utc.with_ymd_and_hms(2025, 8, 23, 23, 59, 59).unwrap();
    assert_eq!(weekday_index(saturday.timestamp()), 6);
    // a second before Sunday midnight still belongs to the previous week
    assert_eq!(weekday_index(sunday.timestamp() - 1), 6);
}
