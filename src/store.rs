// Copyright (c) 2025 Ledgerline Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use rusqlite::{Connection, OptionalExtension, params};

use crate::errors::StoreError;
use crate::models::{Category, Transaction, TxnKind};
use crate::session::Session;

/// A transaction as entered by the user, before validation. `amount` and
/// `category_id` stay optional so a half-filled form can be rejected with a
/// precise message before anything touches the store.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub amount: Option<f64>,
    pub kind: TxnKind,
    pub category_id: Option<i64>,
    pub description: String,
    /// Unix seconds, UTC.
    pub date: i64,
}

pub fn create_category(conn: &Connection, name: &str, kind: TxnKind) -> Result<i64, StoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StoreError::Validation("category name is required".into()));
    }
    conn.execute(
        "INSERT INTO categories(name, type) VALUES (?1, ?2)",
        params![name, kind],
    )
    .map_err(StoreError::Persistence)?;
    Ok(conn.last_insert_rowid())
}

pub fn list_categories(
    conn: &Connection,
    kind: Option<TxnKind>,
) -> Result<Vec<Category>, StoreError> {
    let mut out = Vec::new();
    match kind {
        Some(k) => {
            let mut stmt = conn
                .prepare("SELECT id, name, type FROM categories WHERE type = ?1 ORDER BY name")
                .map_err(StoreError::Fetch)?;
            let rows = stmt
                .query_map(params![k], |r| {
                    Ok(Category {
                        id: r.get(0)?,
                        name: r.get(1)?,
                        kind: r.get(2)?,
                    })
                })
                .map_err(StoreError::Fetch)?;
            for row in rows {
                out.push(row.map_err(StoreError::Fetch)?);
            }
        }
        None => {
            let mut stmt = conn
                .prepare("SELECT id, name, type FROM categories ORDER BY name")
                .map_err(StoreError::Fetch)?;
            let rows = stmt
                .query_map([], |r| {
                    Ok(Category {
                        id: r.get(0)?,
                        name: r.get(1)?,
                        kind: r.get(2)?,
                    })
                })
                .map_err(StoreError::Fetch)?;
            for row in rows {
                out.push(row.map_err(StoreError::Fetch)?);
            }
        }
    }
    Ok(out)
}

pub fn id_for_category(
    conn: &Connection,
    name: &str,
    kind: TxnKind,
) -> Result<i64, StoreError> {
    conn.query_row(
        "SELECT id FROM categories WHERE name = ?1 AND type = ?2",
        params![name, kind],
        |r| r.get(0),
    )
    .optional()
    .map_err(StoreError::Fetch)?
    .ok_or_else(|| StoreError::Validation(format!("{} category '{}' not found", kind, name)))
}

/// Names for a set of category ids in one batched lookup. List rendering
/// resolves all its names through here instead of one query per row.
pub fn category_names(
    conn: &Connection,
    ids: &[i64],
) -> Result<HashMap<i64, String>, StoreError> {
    let mut distinct: Vec<i64> = ids.to_vec();
    distinct.sort_unstable();
    distinct.dedup();

    let mut names = HashMap::new();
    if distinct.is_empty() {
        return Ok(names);
    }
    let placeholders = vec!["?"; distinct.len()].join(",");
    let sql = format!("SELECT id, name FROM categories WHERE id IN ({})", placeholders);
    let mut stmt = conn.prepare(&sql).map_err(StoreError::Fetch)?;
    let rows = stmt
        .query_map(rusqlite::params_from_iter(distinct.iter()), |r| {
            Ok((r.get::<_, i64>(0)?, r.get::<_, String>(1)?))
        })
        .map_err(StoreError::Fetch)?;
    for row in rows {
        let (id, name) = row.map_err(StoreError::Fetch)?;
        names.insert(id, name);
    }
    Ok(names)
}

/// Validates the draft and inserts it under the session's user partition.
/// Validation failures block the submit; no write is attempted.
pub fn create_transaction(
    conn: &Connection,
    session: &Session,
    draft: &TransactionDraft,
) -> Result<i64, StoreError> {
    let amount = draft
        .amount
        .ok_or_else(|| StoreError::Validation("amount is required".into()))?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(StoreError::Validation(format!(
            "amount must be a non-negative number, got {}",
            amount
        )));
    }
    let category_id = draft
        .category_id
        .ok_or_else(|| StoreError::Validation("category is required".into()))?;

    let category_kind: Option<TxnKind> = conn
        .query_row(
            "SELECT type FROM categories WHERE id = ?1",
            params![category_id],
            |r| r.get(0),
        )
        .optional()
        .map_err(StoreError::Fetch)?;
    match category_kind {
        None => {
            return Err(StoreError::Validation(format!(
                "category {} does not exist",
                category_id
            )));
        }
        Some(k) if k != draft.kind => {
            return Err(StoreError::Validation(format!(
                "category {} is {}, not {}",
                category_id, k, draft.kind
            )));
        }
        Some(_) => {}
    }

    conn.execute(
        "INSERT INTO transactions(user_id, date, amount, type, category_id, description)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            session.user_id,
            draft.date,
            amount,
            draft.kind,
            category_id,
            draft.description
        ],
    )
    .map_err(StoreError::Persistence)?;
    Ok(conn.last_insert_rowid())
}

/// The session user's transactions, newest first, optionally filtered by
/// type.
pub fn list_transactions(
    conn: &Connection,
    session: &Session,
    kind: Option<TxnKind>,
) -> Result<Vec<Transaction>, StoreError> {
    let base = "SELECT id, user_id, date, amount, type, category_id, description
                FROM transactions WHERE user_id = ?1";
    let map_row = |r: &rusqlite::Row<'_>| -> rusqlite::Result<Transaction> {
        Ok(Transaction {
            id: r.get(0)?,
            user_id: r.get(1)?,
            date: r.get(2)?,
            amount: r.get(3)?,
            kind: r.get(4)?,
            category_id: r.get(5)?,
            description: r.get(6)?,
        })
    };

    let mut out = Vec::new();
    match kind {
        Some(k) => {
            let sql = format!("{} AND type = ?2 ORDER BY date DESC, id DESC", base);
            let mut stmt = conn.prepare(&sql).map_err(StoreError::Fetch)?;
            let rows = stmt
                .query_map(params![session.user_id, k], map_row)
                .map_err(StoreError::Fetch)?;
            for row in rows {
                out.push(row.map_err(StoreError::Fetch)?);
            }
        }
        None => {
            let sql = format!("{} ORDER BY date DESC, id DESC", base);
            let mut stmt = conn.prepare(&sql).map_err(StoreError::Fetch)?;
            let rows = stmt
                .query_map(params![session.user_id], map_row)
                .map_err(StoreError::Fetch)?;
            for row in rows {
                out.push(row.map_err(StoreError::Fetch)?);
            }
        }
    }
    Ok(out)
}

/// One push-delivered, point-in-time view of the live-queried transaction
/// set. `seq` increases with every snapshot taken on a subscription.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub seq: u64,
    pub transactions: Vec<Transaction>,
}

/// A live view over the session user's transactions, realized on SQLite's
/// `data_version` pragma: the pragma value changes whenever another
/// connection commits, so polling detects external writes without scanning.
pub struct Subscription<'conn> {
    conn: &'conn Connection,
    session: Session,
    kind: Option<TxnKind>,
    data_version: Option<i64>,
    next_seq: u64,
}

pub fn subscribe<'conn>(
    conn: &'conn Connection,
    session: &Session,
    kind: Option<TxnKind>,
) -> Subscription<'conn> {
    Subscription {
        conn,
        session: session.clone(),
        kind,
        data_version: None,
        next_seq: 0,
    }
}

impl Subscription<'_> {
    /// A fresh snapshot on the first poll and after every external commit;
    /// `None` while nothing changed.
    pub fn poll(&mut self) -> Result<Option<Snapshot>, StoreError> {
        let version: i64 = self
            .conn
            .query_row("PRAGMA data_version", [], |r| r.get(0))
            .map_err(StoreError::Fetch)?;
        if self.data_version == Some(version) {
            return Ok(None);
        }
        self.data_version = Some(version);
        let transactions = list_transactions(self.conn, &self.session, self.kind)?;
        self.next_seq += 1;
        Ok(Some(Snapshot {
            seq: self.next_seq,
            transactions,
        }))
    }
}

/// Keeps snapshot application monotonic: a stale snapshot that resolves
/// after a newer one was already applied is rejected instead of overwriting
/// fresher state.
#[derive(Debug, Default)]
pub struct SnapshotGate {
    last_applied: Option<u64>,
}

impl SnapshotGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when `seq` is newer than everything applied so far; the caller
    /// must drop the snapshot otherwise.
    pub fn admit(&mut self, seq: u64) -> bool {
        match self.last_applied {
            Some(last) if seq <= last => false,
            _ => {
                self.last_applied = Some(seq);
                true
            }
        }
    }
}
