// Copyright (c) 2025 Ledgerline Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::models::TxnKind;
use crate::store;
use crate::utils::pretty_table;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let kind: TxnKind = sub.get_one::<String>("type").unwrap().parse()?;
            store::create_category(conn, name, kind)?;
            println!("Added {} category '{}'", kind, name);
        }
        Some(("list", sub)) => {
            let kind = sub
                .get_one::<String>("type")
                .map(|s| s.parse::<TxnKind>())
                .transpose()?;
            let cats = store::list_categories(conn, kind)?;
            let data = cats
                .into_iter()
                .map(|c| vec![c.name, c.kind.to_string()])
                .collect();
            println!("{}", pretty_table(&["Category", "Type"], data));
        }
        _ => {}
    }
    Ok(())
}
