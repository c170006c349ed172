// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::NewExpense;
use crate::repo::settings::get_currency_symbol;
use crate::state::Tracker;
use crate::utils::{
    arg, fmt_money, json_flags, maybe_print_json, opt_arg, parse_date, parse_decimal, parse_id,
    pretty_table,
};
use anyhow::Result;

pub fn handle(tracker: &Tracker, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(tracker, sub)?,
        Some(("list", sub)) => list(tracker, sub)?,
        Some(("rm", sub)) => {
            let id = parse_id(arg(sub, "id")?)?;
            let expense = tracker.detail.delete_expense(id)?;
            let ccy = get_currency_symbol(tracker.connection())?;
            println!(
                "Removed expense '{}' ({} credited back)",
                expense.name,
                fmt_money(&expense.amount, &ccy)
            );
        }
        _ => {}
    }
    Ok(())
}

fn add(tracker: &Tracker, sub: &clap::ArgMatches) -> Result<()> {
    let account_id = parse_id(arg(sub, "account")?)?;
    let date = match opt_arg(sub, "date") {
        Some(d) => parse_date(d)?,
        None => tracker.today(),
    };
    let new = NewExpense {
        name: arg(sub, "name")?.to_string(),
        note: opt_arg(sub, "note").map(str::to_string),
        amount: parse_decimal(arg(sub, "amount")?)?,
        virtual_account_id: account_id,
        date,
    };
    tracker.detail.load(account_id)?;
    let expense = tracker.detail.insert_expense(new)?;

    let ccy = get_currency_symbol(tracker.connection())?;
    println!(
        "Recorded #{} '{}' {} on {}",
        expense.id,
        expense.name,
        fmt_money(&expense.amount, &ccy),
        expense.date
    );
    if let Some(detail) = tracker.detail.current() {
        if detail.account.is_over_limit() {
            println!(
                "Warning: '{}' is over its limit ({} of {})",
                detail.account.name,
                fmt_money(&detail.account.total_spent, &ccy),
                fmt_money(&detail.account.limit, &ccy)
            );
        }
    }
    Ok(())
}

fn list(tracker: &Tracker, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let account_id = parse_id(arg(sub, "account")?)?;
    let detail = tracker.detail.load(account_id)?;
    if !maybe_print_json(json_flag, jsonl_flag, &detail.expenses)? {
        let ccy = get_currency_symbol(tracker.connection())?;
        let rows = detail
            .expenses
            .iter()
            .map(|e| {
                vec![
                    e.id.to_string(),
                    e.date.to_string(),
                    e.name.clone(),
                    fmt_money(&e.amount, &ccy),
                    e.note.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Id", "Date", "Name", "Amount", "Note"], rows));
    }
    Ok(())
}
