// Copyright (c) 2025 Ledgerline Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Utc;
use rusqlite::{Connection, params};

use crate::utils::pretty_table;

pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Transactions pointing at a category that no longer exists
    let mut stmt = conn.prepare(
        "SELECT t.id FROM transactions t
         LEFT JOIN categories c ON t.category_id = c.id
         WHERE t.category_id IS NOT NULL AND c.id IS NULL",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        rows.push(vec!["orphan_category".into(), format!("tx {}", id)]);
    }

    // 2) Transaction type disagreeing with its category's type
    let mut stmt2 = conn.prepare(
        "SELECT t.id, t.type, c.type FROM transactions t
         JOIN categories c ON t.category_id = c.id
         WHERE t.type != c.type",
    )?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let id: i64 = r.get(0)?;
        let t: String = r.get(1)?;
        let c: String = r.get(2)?;
        rows.push(vec![
            "type_mismatch".into(),
            format!("tx {} is {} but category is {}", id, t, c),
        ]);
    }

    // 3) Future-dated transactions
    let now = Utc::now().timestamp();
    let mut stmt3 = conn.prepare("SELECT id, date FROM transactions WHERE date > ?1")?;
    let mut cur3 = stmt3.query(params![now])?;
    while let Some(r) = cur3.next()? {
        let id: i64 = r.get(0)?;
        let date: i64 = r.get(1)?;
        rows.push(vec![
            "future_date".into(),
            format!("tx {} dated {}", id, date),
        ]);
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
