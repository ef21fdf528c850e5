// Copyright (c) 2025 Ledgerline Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{Connection, OptionalExtension, params};

use crate::errors::StoreError;

/// The authenticated user for the current invocation. Established once and
/// passed explicitly into every store call that touches user-partitioned
/// data; nothing reads ambient auth state on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
}

pub fn login(conn: &Connection, user_id: &str) -> Result<Session, StoreError> {
    let user_id = user_id.trim();
    if user_id.is_empty() {
        return Err(StoreError::Validation("user name is required".into()));
    }
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('current_user', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![user_id],
    )
    .map_err(StoreError::Persistence)?;
    Ok(Session {
        user_id: user_id.to_string(),
    })
}

pub fn logout(conn: &Connection) -> Result<(), StoreError> {
    conn.execute("DELETE FROM settings WHERE key='current_user'", [])
        .map_err(StoreError::Persistence)?;
    Ok(())
}

pub fn current(conn: &Connection) -> Result<Option<Session>, StoreError> {
    let user: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key='current_user'",
            [],
            |r| r.get(0),
        )
        .optional()
        .map_err(StoreError::Fetch)?;
    Ok(user.map(|user_id| Session { user_id }))
}

/// The active session, or `Auth` when nobody is logged in.
pub fn require(conn: &Connection) -> Result<Session, StoreError> {
    current(conn)?.ok_or(StoreError::Auth)
}
