// Copyright (c) 2025 Ledgerline Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON instead of a table"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

fn window_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("offset")
            .long("offset")
            .allow_negative_numbers(true)
            .value_parser(value_parser!(i64))
            .default_value("0")
            .help("Week offset from the current week (e.g. -1 for last week)"),
    )
    .arg(
        Arg::new("type")
            .long("type")
            .default_value("Income")
            .help("Income or Expense"),
    )
}

pub fn build_cli() -> Command {
    Command::new("ledgerline")
        .about("Track income and expenses; chart weekly summaries")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Create the database and schema"))
        .subcommand(
            Command::new("user")
                .about("Manage the active session")
                .subcommand(
                    Command::new("login")
                        .about("Set the active user")
                        .arg(Arg::new("name").required(true)),
                )
                .subcommand(Command::new("logout").about("Clear the active user"))
                .subcommand(Command::new("show").about("Print the active user")),
        )
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(
                    Command::new("add")
                        .about("Add a category")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("Income or Expense"),
                        ),
                )
                .subcommand(
                    Command::new("list")
                        .about("List categories")
                        .arg(Arg::new("type").long("type").help("Filter by type")),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and list transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("type").long("type").default_value("Expense"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("description").long("description"))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("YYYY-MM-DD or unix seconds; defaults to now"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List recent transactions, newest first")
                        .arg(Arg::new("type").long("type").help("Filter by type"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                )),
        )
        .subcommand(json_flags(window_args(
            Command::new("summary")
                .about("Weekly income/spending summary for one calendar week")
                .arg(
                    Arg::new("mode")
                        .long("mode")
                        .default_value("bar")
                        .help("bar (weekday buckets) or line (per-transaction points)"),
                )
                .arg(
                    Arg::new("svg")
                        .long("svg")
                        .help("Also write the chart as SVG to this path"),
                ),
        )))
        .subcommand(window_args(
            Command::new("watch")
                .about("Re-render the weekly summary whenever the store changes")
                .arg(
                    Arg::new("interval")
                        .long("interval")
                        .value_parser(value_parser!(u64))
                        .default_value("500")
                        .help("Poll interval in milliseconds"),
                )
                .arg(
                    Arg::new("count")
                        .long("count")
                        .value_parser(value_parser!(u64))
                        .help("Exit after applying this many snapshots"),
                ),
        ))
        .subcommand(
            Command::new("import").about("Import data").subcommand(
                Command::new("transactions")
                    .about("Import transactions from CSV (date,amount,type,category,description)")
                    .arg(Arg::new("path").long("path").required(true)),
            ),
        )
        .subcommand(
            Command::new("export").about("Export data").subcommand(
                Command::new("transactions")
                    .about("Export the active user's transactions")
                    .arg(Arg::new("format").long("format").default_value("csv"))
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
        .subcommand(Command::new("doctor").about("Check the store for inconsistencies"))
}
