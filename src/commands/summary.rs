// Copyright (c) 2025 Ledgerline Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;

use crate::models::{ChartBucket, ChartPoint, TxnKind, WeekWindow};
use crate::utils::{fmt_timestamp, maybe_print_json, pretty_table};
use crate::{aggregate, chart, session, store, timewin};

fn total_label(kind: TxnKind) -> &'static str {
    match kind {
        TxnKind::Income => "Income",
        TxnKind::Expense => "Spending",
    }
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let offset = *m.get_one::<i64>("offset").unwrap_or(&0);
    let kind: TxnKind = m.get_one::<String>("type").unwrap().parse()?;
    let mode = m.get_one::<String>("mode").unwrap();
    let session = session::require(conn)?;
    let window = timewin::week_window(Utc::now(), offset);

    match mode.as_str() {
        "bar" => {
            // A failed fetch degrades to an empty week; the view never dies.
            let buckets = match aggregate::weekday_buckets_sql(conn, &session, &window, kind) {
                Ok(b) => b,
                Err(e) => {
                    eprintln!("Error: could not load weekly summary ({}); showing an empty week", e);
                    aggregate::empty_buckets()
                }
            };
            if let Some(path) = m.get_one::<String>("svg") {
                chart::render_bar_svg(&buckets, Path::new(path))?;
            }
            print_bar(m, &window, kind, &buckets)?;
        }
        "line" => {
            let txns = match store::list_transactions(conn, &session, Some(kind)) {
                Ok(t) => t,
                Err(e) => {
                    eprintln!("Error: could not load transactions ({}); showing an empty week", e);
                    Vec::new()
                }
            };
            let points = aggregate::point_series(&txns, &window, kind);
            if let Some(path) = m.get_one::<String>("svg") {
                chart::render_line_svg(&points, Path::new(path))?;
            }
            print_line(m, &window, kind, &points)?;
        }
        other => anyhow::bail!("Unknown mode '{}' (use bar|line)", other),
    }
    Ok(())
}

fn print_bar(
    m: &clap::ArgMatches,
    window: &WeekWindow,
    kind: TxnKind,
    buckets: &[ChartBucket],
) -> Result<()> {
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &buckets)? {
        return Ok(());
    }
    println!("{}", timewin::window_label(window));
    println!(
        "Total {}: {:.2}",
        total_label(kind),
        aggregate::bucket_total(buckets)
    );
    let rows = buckets
        .iter()
        .map(|b| vec![b.label.to_string(), format!("{:.2}", b.value)])
        .collect();
    println!("{}", pretty_table(&["Day", total_label(kind)], rows));
    Ok(())
}

fn print_line(
    m: &clap::ArgMatches,
    window: &WeekWindow,
    kind: TxnKind,
    points: &[ChartPoint],
) -> Result<()> {
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &points)? {
        return Ok(());
    }
    println!("{}", timewin::window_label(window));
    // The total is shown even when fewer than two points leave no curve to
    // draw.
    println!(
        "Total {}: {:.2}",
        total_label(kind),
        aggregate::series_total(points)
    );
    let rows = points
        .iter()
        .map(|p| vec![fmt_timestamp(p.x), format!("{:.2}", p.y)])
        .collect();
    println!("{}", pretty_table(&["Date", total_label(kind)], rows));
    Ok(())
}
