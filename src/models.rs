// Copyright (c) 2025 Ledgerline Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use rusqlite::ToSql;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxnKind {
    Income,
    Expense,
}

impl TxnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxnKind::Income => "Income",
            TxnKind::Expense => "Expense",
        }
    }
}

impl fmt::Display for TxnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxnKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Income" | "income" => Ok(TxnKind::Income),
            "Expense" | "expense" => Ok(TxnKind::Expense),
            other => Err(anyhow::anyhow!(
                "Invalid transaction type '{}', expected Income or Expense",
                other
            )),
        }
    }
}

impl FromSql for TxnKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "Income" => Ok(TxnKind::Income),
            "Expense" => Ok(TxnKind::Expense),
            other => Err(FromSqlError::Other(
                format!("unknown transaction type '{}'", other).into(),
            )),
        }
    }
}

impl ToSql for TxnKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

/// A recorded income or expense. Immutable once created; partitioned per
/// user via `user_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub user_id: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TxnKind,
    pub category_id: Option<i64>,
    pub description: String,
    /// Unix seconds, UTC.
    pub date: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TxnKind,
}

/// Inclusive Unix-second boundaries of one calendar week. Derived, never
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekWindow {
    pub start_inclusive: i64,
    pub end_inclusive: i64,
}

impl WeekWindow {
    pub fn contains(&self, ts: i64) -> bool {
        ts >= self.start_inclusive && ts <= self.end_inclusive
    }
}

/// One aggregation slot of a bar chart: a weekday and its summed amount.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBucket {
    pub label: &'static str,
    pub value: f64,
}

/// One line-chart point: a transaction's date against its amount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: i64,
    pub y: f64,
}
