// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use std::rc::Rc;

use moneyjar::clock::{Clock, SystemClock};
use moneyjar::commands::accounts::{ACCOUNT_HEADERS, account_row};
use moneyjar::repo::settings::get_currency_symbol;
use moneyjar::rollover::RolloverOutcome;
use moneyjar::utils::{fmt_money, init_tracing, pretty_table};
use moneyjar::{Tracker, cli, commands, db};

fn main() -> Result<()> {
    init_tracing();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let clock: Rc<dyn Clock> = Rc::new(SystemClock);
    let path = db::db_path(matches.get_one::<String>("db").map(String::as_str))?;
    let conn = db::open_or_init(&path, clock.as_ref())?;
    let tracker = Tracker::new(conn, clock);

    // The month must be closed before anything reads the balance.
    let startup = tracker.startup();
    match &startup.rollover {
        Ok(RolloverOutcome::Completed(summary)) => commands::rollover::print_summary(summary),
        Ok(RolloverOutcome::NotDue { .. }) => {}
        Err(e) => eprintln!("warning: monthly rollover did not run: {e:#}"),
    }
    startup
        .load
        .with_context(|| format!("Load balance, incomes and accounts from {}", path.display()))?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", path.display());
        }
        Some(("status", _)) => status(&tracker)?,
        Some(("balance", sub)) => commands::balance::handle(&tracker, sub)?,
        Some(("income", sub)) => commands::incomes::handle(&tracker, sub)?,
        Some(("account", sub)) => commands::accounts::handle(&tracker, sub)?,
        Some(("expense", sub)) => commands::expenses::handle(&tracker, sub)?,
        Some(("report", sub)) => commands::reports::handle(&tracker, sub)?,
        Some(("rollover", sub)) => commands::rollover::handle(&tracker, sub)?,
        Some(("config", sub)) => commands::config::handle(tracker.connection(), sub)?,
        Some(("doctor", _)) => commands::doctor::handle(tracker.connection(), tracker.today())?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}

fn status(tracker: &Tracker) -> Result<()> {
    let ccy = get_currency_symbol(tracker.connection())?;
    println!("Balance: {}", fmt_money(&tracker.balance.balance(), &ccy));
    println!("Period:  {}", tracker.rollover.stored_period()?);
    let rows = tracker
        .accounts
        .accounts()
        .iter()
        .map(|a| account_row(a, &ccy))
        .collect();
    println!("{}", pretty_table(&ACCOUNT_HEADERS, rows));
    Ok(())
}
