// Copyright (c) 2025 Ledgerline Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;

use crate::models::{Transaction, TxnKind};
use crate::store::{self, SnapshotGate};
use crate::utils::{fmt_timestamp, pretty_table};
use crate::{aggregate, session, timewin};

/// Re-renders the weekly summary whenever another connection commits. Each
/// snapshot triggers a full re-aggregation; the gate drops any snapshot
/// older than the last one applied.
pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let offset = *m.get_one::<i64>("offset").unwrap_or(&0);
    let kind: TxnKind = m.get_one::<String>("type").unwrap().parse()?;
    let interval = *m.get_one::<u64>("interval").unwrap_or(&500);
    let count = m.get_one::<u64>("count").copied();

    let session = session::require(conn)?;
    let mut sub = store::subscribe(conn, &session, Some(kind));
    let mut gate = SnapshotGate::new();
    let mut applied: u64 = 0;

    loop {
        if let Some(snap) = sub.poll()? {
            if gate.admit(snap.seq) {
                let window = timewin::week_window(Utc::now(), offset);
                let buckets = aggregate::weekday_buckets(&snap.transactions, &window, kind);
                println!(
                    "[snapshot {}] {}  total {}: {:.2}",
                    snap.seq,
                    timewin::window_label(&window),
                    kind,
                    aggregate::bucket_total(&buckets)
                );
                let rows = buckets
                    .iter()
                    .map(|b| vec![b.label.to_string(), format!("{:.2}", b.value)])
                    .collect();
                println!("{}", pretty_table(&["Day", kind.as_str()], rows));
                print_recent(conn, &snap.transactions)?;

                applied += 1;
                if let Some(n) = count {
                    if applied >= n {
                        break;
                    }
                }
            }
        }
        std::thread::sleep(Duration::from_millis(interval));
    }
    Ok(())
}

/// The newest few transactions under the chart, with category names
/// resolved in a single batched lookup.
fn print_recent(conn: &Connection, txns: &[Transaction]) -> Result<()> {
    let recent = &txns[..txns.len().min(5)];
    if recent.is_empty() {
        return Ok(());
    }
    let ids: Vec<i64> = recent.iter().filter_map(|t| t.category_id).collect();
    let names = store::category_names(conn, &ids)?;
    println!("Recent:");
    for t in recent {
        let category = t
            .category_id
            .and_then(|id| names.get(&id))
            .map(String::as_str)
            .unwrap_or("Unknown");
        println!(
            "  {}  {:>10.2}  {}  {}",
            fmt_timestamp(t.date),
            t.amount,
            category,
            t.description
        );
    }
    Ok(())
}
