// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version};

fn json_args(cmd: Command) -> Command {
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
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn id_arg(help: &'static str) -> Arg {
    Arg::new("id").long("id").required(true).help(help)
}

fn amount_arg(help: &'static str) -> Arg {
    Arg::new("amount")
        .long("amount")
        .required(true)
        .allow_hyphen_values(true)
        .help(help)
}

pub fn build_cli() -> Command {
    Command::new("moneyjar")
        .version(crate_version!())
        .about("Main balance, budget envelopes and monthly rollover reports")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .help("Path to the SQLite database (default: $MONEYJAR_DB or the platform data dir)"),
        )
        .subcommand(Command::new("init").about("Create the database if needed"))
        .subcommand(Command::new("status").about("Balance, period marker and envelopes at a glance"))
        .subcommand(
            Command::new("balance")
                .about("Main account balance")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set").arg(amount_arg("New balance; negative values are stored as 0")),
                ),
        )
        .subcommand(
            Command::new("income")
                .about("Incomes credited to the main balance")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(amount_arg("Amount, greater than 0"))
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(json_args(Command::new("list")))
                .subcommand(Command::new("rm").arg(id_arg("Income id"))),
        )
        .subcommand(
            Command::new("account")
                .about("Virtual accounts (budget envelopes)")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .required(true)
                                .allow_hyphen_values(true)
                                .help("Spending limit, greater than 0"),
                        )
                        .arg(
                            Arg::new("no-reset")
                                .long("no-reset")
                                .action(ArgAction::SetTrue)
                                .help("Keep expenses across months instead of closing monthly"),
                        ),
                )
                .subcommand(json_args(Command::new("list")))
                .subcommand(json_args(Command::new("show").arg(id_arg("Virtual account id"))))
                .subcommand(
                    Command::new("rename")
                        .arg(id_arg("Virtual account id"))
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(
                    Command::new("limit")
                        .arg(id_arg("Virtual account id"))
                        .arg(amount_arg("New limit, greater than 0")),
                )
                .subcommand(Command::new("rm").arg(id_arg("Virtual account id"))),
        )
        .subcommand(
            Command::new("expense")
                .about("Expenses charged to a virtual account")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("account").long("account").required(true))
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(amount_arg("Amount, greater than 0"))
                        .arg(Arg::new("note").long("note"))
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, defaults to today")),
                )
                .subcommand(json_args(
                    Command::new("list").arg(Arg::new("account").long("account").required(true)),
                ))
                .subcommand(Command::new("rm").arg(id_arg("Expense id"))),
        )
        .subcommand(
            Command::new("report")
                .about("Closed monthly reports")
                .subcommand(json_args(
                    Command::new("list").arg(Arg::new("account").long("account").required(true)),
                ))
                .subcommand(json_args(
                    Command::new("history")
                        .arg(Arg::new("account").long("account").required(true))
                        .arg(Arg::new("month").long("month").required(true).help("YYYY-MM")),
                )),
        )
        .subcommand(
            Command::new("rollover")
                .about("Monthly close")
                .subcommand(Command::new("status"))
                .subcommand(Command::new("run")),
        )
        .subcommand(
            Command::new("config").about("Settings").subcommand(
                Command::new("currency")
                    .about("Show or set the display currency symbol")
                    .arg(Arg::new("set").long("set")),
            ),
        )
        .subcommand(Command::new("doctor").about("Check stored totals and balances for drift"))
}
