// Copyright (c) 2025 Ledgerline Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{TimeZone, Utc};
use ledgerline::aggregate::{
    bucket_total, point_series, series_total, weekday_buckets, weekday_buckets_sql,
};
use ledgerline::models::{Transaction, TxnKind, WeekWindow};
use ledgerline::store::{self, TransactionDraft};
use ledgerline::timewin::week_window;
use ledgerline::{db, session};
use rusqlite::Connection;

fn txn(amount: f64, kind: TxnKind, date: i64) -> Transaction {
    Transaction {
        id: 0,
        user_id: "kai".into(),
        amount,
        kind,
        category_id: Some(1),
        description: String::new(),
        date,
    }
}

fn test_window() -> WeekWindow {
    // Sun Aug 17 .. Sat Aug 23, 2025
    week_window(Utc.with_ymd_and_hms(2025, 8, 20, 12, 0, 0).unwrap(), 0)
}

fn ts(day: u32, hour: u32) -> i64 {
    Utc.with_ymd_and_hms(2025, 8, day, hour, 0, 0)
        .unwrap()
        .timestamp()
}

#[test]
fn income_on_monday_lands_in_monday_bucket_only() {
    let window = test_window();
    let txns = vec![
        txn(100.0, TxnKind::Income, ts(18, 10)), // Monday
        txn(50.0, TxnKind::Income, ts(18, 14)),  // Monday
        txn(30.0, TxnKind::Expense, ts(19, 9)),  // Tuesday
    ];
    let buckets = weekday_buckets(&txns, &window, TxnKind::Income);
    assert_eq!(buckets.len(), 7);
    assert_eq!(buckets[1].value, 150.0);
    for (i, b) in buckets.iter().enumerate() {
        if i != 1 {
            assert_eq!(b.value, 0.0, "bucket {} should be empty", i);
        }
    }
    assert_eq!(bucket_total(&buckets), 150.0);
}

#[test]
fn buckets_are_fixed_order_and_zero_filled() {
    let window = test_window();
    let buckets = weekday_buckets(&[], &window, TxnKind::Expense);
    let labels: Vec<&str> = buckets.iter().map(|b| b.label).collect();
    assert_eq!(labels, ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]);
    assert!(buckets.iter().all(|b| b.value == 0.0));
}

#[test]
fn bucket_sum_equals_sum_of_matching_transactions() {
    let window = test_window();
    let txns = vec![
        txn(10.0, TxnKind::Expense, ts(17, 8)),
        txn(20.5, TxnKind::Expense, ts(19, 8)),
        txn(7.25, TxnKind::Expense, ts(23, 8)),
        txn(99.0, TxnKind::Income, ts(19, 8)),               // wrong type
        txn(44.0, TxnKind::Expense, window.end_inclusive + 60), // outside window
    ];
    let buckets = weekday_buckets(&txns, &window, TxnKind::Expense);
    assert_eq!(bucket_total(&buckets), 10.0 + 20.5 + 7.25);
}

#[test]
fn window_end_is_inclusive_to_the_second() {
    let window = test_window();
    let at_end = vec![txn(5.0, TxnKind::Expense, window.end_inclusive)];
    let buckets = weekday_buckets(&at_end, &window, TxnKind::Expense);
    assert_eq!(buckets[6].value, 5.0);

    let past_end = vec![txn(5.0, TxnKind::Expense, window.end_inclusive + 1)];
    let buckets = weekday_buckets(&past_end, &window, TxnKind::Expense);
    assert!(buckets.iter().all(|b| b.value == 0.0));

    let at_start = vec![txn(5.0, TxnKind::Expense, window.start_inclusive)];
    let buckets = weekday_buckets(&at_start, &window, TxnKind::Expense);
    assert_eq!(buckets[0].value, 5.0);
}

#[test]
fn point_series_is_chronological_one_point_per_transaction() {
    let window = test_window();
    let txns = vec![
        txn(30.0, TxnKind::Income, ts(22, 9)),
        txn(10.0, TxnKind::Income, ts(18, 9)),
        txn(20.0, TxnKind::Income, ts(20, 9)),
        txn(99.0, TxnKind::Expense, ts(20, 10)),
    ];
    let points = point_series(&txns, &window, TxnKind::Income);
    assert_eq!(points.len(), 3);
    assert!(points.windows(2).all(|w| w[0].x <= w[1].x));
    assert_eq!(points[0].y, 10.0);
    assert_eq!(points[2].y, 30.0);
    assert_eq!(series_total(&points), 60.0);
}

#[test]
fn empty_input_yields_zero_buckets_and_empty_series() {
    let window = test_window();
    let buckets = weekday_buckets(&[], &window, TxnKind::Income);
    assert_eq!(buckets.len(), 7);
    assert!(buckets.iter().all(|b| b.value == 0.0));
    let points = point_series(&[], &window, TxnKind::Income);
    assert!(points.is_empty());
    assert_eq!(series_total(&points), 0.0);
}

#[test]
fn sql_buckets_agree_with_in_memory_buckets() {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    let session = session::login(&conn, "kai").unwrap();
    let groceries = store::create_category(&conn, "Groceries", TxnKind::Expense).unwrap();
    let salary = store::create_category(&conn, "Salary", TxnKind::Income).unwrap();

    let window = test_window();
    let entries = [
        (12.0, TxnKind::Expense, groceries, ts(17, 9)),
        (8.5, TxnKind::Expense, groceries, ts(18, 9)),
        (3.25, TxnKind::Expense, groceries, ts(18, 20)),
        (40.0, TxnKind::Expense, groceries, window.end_inclusive),
        (500.0, TxnKind::Income, salary, ts(19, 9)),
        (9.0, TxnKind::Expense, groceries, window.end_inclusive + 1), // next week
    ];
    for (amount, kind, cat, date) in entries {
        store::create_transaction(
            &conn,
            &session,
            &TransactionDraft {
                amount: Some(amount),
                kind,
                category_id: Some(cat),
                description: String::new(),
                date,
            },
        )
        .unwrap();
    }
    // another user's data must not leak into the aggregation
    let other = session::login(&conn, "sam").unwrap();
    store::create_transaction(
        &conn,
        &other,
        &TransactionDraft {
            amount: Some(77.0),
            kind: TxnKind::Expense,
            category_id: Some(groceries),
            description: String::new(),
            date: ts(18, 9),
        },
    )
    .unwrap();

    let sql = weekday_buckets_sql(&conn, &session, &window, TxnKind::Expense).unwrap();
    let all = store::list_transactions(&conn, &session, None).unwrap();
    let mem = weekday_buckets(&all, &window, TxnKind::Expense);
    assert_eq!(sql, mem);
    assert_eq!(bucket_total(&sql), 12.0 + 8.5 + 3.25 + 40.0);
    assert_eq!(sql[0].value, 12.0);
    assert_eq!(sql[1].value, 8.5 + 3.25);
    assert_eq!(sql[6].value, 40.0);
}
