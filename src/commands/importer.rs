// Copyright (c) 2025 Ledgerline Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::{HashMap, hash_map::Entry};

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use rusqlite::Connection;

use crate::models::TxnKind;
use crate::session;
use crate::store::{self, TransactionDraft};
use crate::utils::{parse_amount, parse_date};

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => import_transactions(conn, sub),
        _ => Ok(()),
    }
}

/// Imports `date,amount,type,category,description` rows under the active
/// user, all or nothing.
fn import_transactions(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let session = session::require(conn)?;
    let path = sub.get_one::<String>("path").unwrap().trim();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    let tx = conn.transaction()?;
    let mut category_cache: HashMap<(String, TxnKind), i64> = HashMap::new();
    let mut imported = 0usize;

    for result in rdr.records() {
        let rec = result?;
        let date_raw = rec.get(0).context("date missing")?.trim();
        let amount_raw = rec.get(1).context("amount missing")?.trim();
        let kind_raw = rec.get(2).context("type missing")?.trim();
        let category = rec.get(3).unwrap_or("").trim().to_string();
        let description = rec.get(4).unwrap_or("").trim().to_string();

        let date = parse_date(date_raw)?;
        let amount = parse_amount(amount_raw)
            .with_context(|| format!("Invalid amount '{}' on {}", amount_raw, date_raw))?;
        let kind: TxnKind = kind_raw.parse()?;

        let category_id = if category.is_empty() {
            None
        } else {
            let id = match category_cache.entry((category.clone(), kind)) {
                Entry::Occupied(entry) => *entry.get(),
                Entry::Vacant(entry) => {
                    let fetched = store::id_for_category(&tx, &category, kind)?;
                    *entry.insert(fetched)
                }
            };
            Some(id)
        };

        store::create_transaction(
            &tx,
            &session,
            &TransactionDraft {
                amount: Some(amount),
                kind,
                category_id,
                description,
                date,
            },
        )?;
        imported += 1;
    }
    tx.commit()?;
    println!("Imported {} transactions from {}", imported, path);
    Ok(())
}
