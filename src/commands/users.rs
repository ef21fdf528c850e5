// Copyright (c) 2025 Ledgerline Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::session;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("login", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let s = session::login(conn, name)?;
            println!("Logged in as '{}'", s.user_id);
        }
        Some(("logout", _)) => {
            session::logout(conn)?;
            println!("Logged out");
        }
        Some(("show", _)) => match session::current(conn)? {
            Some(s) => println!("{}", s.user_id),
            None => println!("(nobody logged in)"),
        },
        _ => {}
    }
    Ok(())
}
