// Copyright (c) 2025 Wonbook contributors.
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
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn kind_arg() -> Arg {
    Arg::new("kind")
        .long("kind")
        .required(true)
        .value_parser(["income", "expense"])
        .help("Partition: income or expense")
}

pub fn build_cli() -> Command {
    Command::new("wonbook")
        .about("Personal income/expense ledger with monthly calendar, gallery, and statistics views")
        .version(clap::crate_version!())
        .subcommand_required(false)
        .subcommand(Command::new("init").about("Create the database if it does not exist"))
        .subcommand(
            Command::new("category")
                .about("Manage income/expense categories")
                .subcommand(
                    Command::new("add")
                        .about("Add a category to one partition")
                        .arg(kind_arg())
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("icon")
                                .long("icon")
                                .default_value("label")
                                .help("Symbolic icon key"),
                        )
                        .arg(
                            Arg::new("color")
                                .long("color")
                                .help("Display color as #RRGGBB (expense categories only)"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list").about("List categories of both partitions"),
                ))
                .subcommand(
                    Command::new("rename")
                        .about("Rename a category")
                        .arg(kind_arg())
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a category; its transactions keep their rows")
                        .arg(kind_arg())
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        ),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and inspect transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record an income or expense")
                        .arg(kind_arg())
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("desc").long("desc").required(true))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .required(true)
                                .help("Occurrence date, YYYY-MM-DD"),
                        )
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .help("Category name within the same partition"),
                        )
                        .arg(
                            Arg::new("photo")
                                .long("photo")
                                .help("Photo URI (expenses only)"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .arg(Arg::new("month").long("month").help("Restrict to YYYY-MM"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction by id and partition")
                        .arg(kind_arg())
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("photos").about("List expenses that carry a photo"),
                )),
        )
        .subcommand(
            Command::new("stats")
                .about("Monthly statistics")
                .subcommand(json_flags(
                    Command::new("month")
                        .about("Totals, per-category and per-day sums for one month")
                        .arg(Arg::new("month").required(true).help("YYYY-MM")),
                ))
                .subcommand(
                    Command::new("trend")
                        .about("Cumulative spending against a comparison month")
                        .arg(Arg::new("month").required(true).help("YYYY-MM"))
                        .arg(
                            Arg::new("compare")
                                .long("compare")
                                .help("Comparison month, YYYY-MM (default: previous month)"),
                        ),
                )
                .subcommand(
                    Command::new("plan")
                        .about("Recommended per-day spend by category for the rest of the month")
                        .arg(Arg::new("month").required(true).help("YYYY-MM"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .required(true)
                                .help("Monthly spending limit"),
                        ),
                ),
        )
        .subcommand(
            Command::new("calendar")
                .about("Per-day totals for a month, or one day's transactions")
                .arg(Arg::new("month").required(true).help("YYYY-MM"))
                .arg(
                    Arg::new("day")
                        .long("day")
                        .value_parser(value_parser!(u32))
                        .help("Show the transactions of this day instead"),
                ),
        )
}
