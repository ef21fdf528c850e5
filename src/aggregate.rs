// Copyright (c) 2025 Ledgerline Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{Connection, params};

use crate::errors::StoreError;
use crate::models::{ChartBucket, ChartPoint, Transaction, TxnKind, WeekWindow};
use crate::session::Session;
use crate::timewin::{DAY_LABELS, weekday_index};

fn matches(t: &Transaction, window: &WeekWindow, kind: TxnKind) -> bool {
    t.kind == kind && window.contains(t.date)
}

/// Seven zero-valued buckets, Sun through Sat.
pub fn empty_buckets() -> Vec<ChartBucket> {
    DAY_LABELS
        .iter()
        .map(|&label| ChartBucket { label, value: 0.0 })
        .collect()
}

/// Bar mode: sum the matching transactions into weekday buckets.
///
/// Always returns exactly 7 buckets in fixed Sun..Sat order regardless of
/// input order or sparsity; days without matches report 0.
pub fn weekday_buckets(
    txns: &[Transaction],
    window: &WeekWindow,
    kind: TxnKind,
) -> Vec<ChartBucket> {
    let mut buckets = empty_buckets();
    for t in txns.iter().filter(|t| matches(t, window, kind)) {
        buckets[weekday_index(t.date)].value += t.amount;
    }
    buckets
}

/// Line mode: one chronologically ordered point per matching transaction,
/// no bucketing.
pub fn point_series(txns: &[Transaction], window: &WeekWindow, kind: TxnKind) -> Vec<ChartPoint> {
    let mut points: Vec<ChartPoint> = txns
        .iter()
        .filter(|t| matches(t, window, kind))
        .map(|t| ChartPoint {
            x: t.date,
            y: t.amount,
        })
        .collect();
    points.sort_by_key(|p| p.x);
    points
}

pub fn bucket_total(buckets: &[ChartBucket]) -> f64 {
    buckets.iter().map(|b| b.value).sum()
}

pub fn series_total(points: &[ChartPoint]) -> f64 {
    points.iter().map(|p| p.y).sum()
}

/// Bar mode computed in the store: one grouped SELECT over day-of-week
/// within the inclusive window, filtered by exact type. `strftime('%w', ...,
/// 'unixepoch')` derives the weekday on the UTC calendar, the same policy as
/// [`weekday_index`], so both aggregation paths agree.
pub fn weekday_buckets_sql(
    conn: &Connection,
    session: &Session,
    window: &WeekWindow,
    kind: TxnKind,
) -> Result<Vec<ChartBucket>, StoreError> {
    let mut stmt = conn
        .prepare(
            "SELECT CAST(strftime('%w', date, 'unixepoch') AS INTEGER) AS day_of_week,
                    SUM(amount) AS total
             FROM transactions
             WHERE user_id = ?1 AND date >= ?2 AND date <= ?3 AND type = ?4
             GROUP BY day_of_week
             ORDER BY day_of_week ASC",
        )
        .map_err(StoreError::Fetch)?;
    let rows = stmt
        .query_map(
            params![
                session.user_id,
                window.start_inclusive,
                window.end_inclusive,
                kind
            ],
            |r| Ok((r.get::<_, i64>(0)?, r.get::<_, Option<f64>>(1)?)),
        )
        .map_err(StoreError::Fetch)?;

    let mut buckets = empty_buckets();
    for row in rows {
        let (day_of_week, total) = row.map_err(StoreError::Fetch)?;
        if let Some(bucket) = buckets.get_mut(day_of_week as usize) {
            bucket.value = total.unwrap_or(0.0);
        }
    }
    Ok(buckets)
}
