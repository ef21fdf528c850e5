// Copyright (c) 2025 Ledgerline Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failures at the store boundary. All of these are caught at the command
/// layer and surfaced as a user-facing message; none crash the process.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Input rejected before any backend call was made.
    #[error("invalid input: {0}")]
    Validation(String),

    /// No authenticated session at write time.
    #[error("no active user; run `ledgerline user login <name>` first")]
    Auth,

    /// The store rejected a write.
    #[error("write rejected by the store")]
    Persistence(#[source] rusqlite::Error),

    /// A read from the store failed.
    #[error("read from the store failed")]
    Fetch(#[source] rusqlite::Error),
}
