// Copyright (c) 2025 Ledgerline Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;
use serde::Serialize;

use crate::models::TxnKind;
use crate::session;
use crate::store::{self, TransactionDraft};
use crate::utils::{fmt_timestamp, maybe_print_json, parse_amount, parse_date, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let session = session::require(conn)?;
    let amount = sub
        .get_one::<String>("amount")
        .map(|s| parse_amount(s))
        .transpose()?;
    let kind: TxnKind = sub.get_one::<String>("type").unwrap().parse()?;
    let category_id = sub
        .get_one::<String>("category")
        .map(|name| store::id_for_category(conn, name, kind))
        .transpose()?;
    let description = sub
        .get_one::<String>("description")
        .cloned()
        .unwrap_or_default();
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => Utc::now().timestamp(),
    };

    let draft = TransactionDraft {
        amount,
        kind,
        category_id,
        description,
        date,
    };
    let id = store::create_transaction(conn, &session, &draft)?;
    println!(
        "Recorded {} {:.2} on {} (id {})",
        kind,
        amount.unwrap_or(0.0),
        fmt_timestamp(date),
        id
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.amount.clone(),
                    r.kind.clone(),
                    r.category.clone(),
                    r.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Amount", "Type", "Category", "Description"], rows)
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub date: String,
    pub amount: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub description: String,
}

/// The session user's transactions with category names resolved by the
/// join, not one lookup per row.
pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let session = session::require(conn)?;
    let mut sql = String::from(
        "SELECT t.date, t.amount, t.type, c.name, t.description
         FROM transactions t LEFT JOIN categories c ON t.category_id = c.id
         WHERE t.user_id = ?",
    );
    let mut params_vec: Vec<String> = vec![session.user_id];

    if let Some(kind) = sub.get_one::<String>("type") {
        let kind: TxnKind = kind.parse()?;
        sql.push_str(" AND t.type = ?");
        params_vec.push(kind.to_string());
    }
    sql.push_str(" ORDER BY t.date DESC, t.id DESC");
    if let Some(limit) = sub.get_one::<usize>("limit") {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(params))?;

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let date: i64 = r.get(0)?;
        let amount: f64 = r.get(1)?;
        let kind: TxnKind = r.get(2)?;
        let category: Option<String> = r.get(3)?;
        let description: String = r.get(4)?;
        data.push(TransactionRow {
            date: fmt_timestamp(date),
            amount: format!("{:.2}", amount),
            kind: kind.to_string(),
            category: category.unwrap_or_else(|| "Unknown".into()),
            description,
        });
    }
    Ok(data)
}
