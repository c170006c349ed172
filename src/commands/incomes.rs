// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::repo::settings::get_currency_symbol;
use crate::state::Tracker;
use crate::utils::{
    arg, fmt_money, json_flags, maybe_print_json, opt_arg, parse_decimal, parse_id, pretty_table,
};
use anyhow::Result;

pub fn handle(tracker: &Tracker, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(tracker, sub)?,
        Some(("list", sub)) => list(tracker, sub)?,
        Some(("rm", sub)) => remove(tracker, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(tracker: &Tracker, sub: &clap::ArgMatches) -> Result<()> {
    let name = arg(sub, "name")?;
    let amount = parse_decimal(arg(sub, "amount")?)?;
    let note = opt_arg(sub, "note");
    let income = tracker.incomings.add(name, note, amount)?;
    let ccy = get_currency_symbol(tracker.connection())?;
    println!(
        "Added income #{} '{}' {} (balance: {})",
        income.id,
        income.name,
        fmt_money(&income.amount, &ccy),
        fmt_money(&tracker.balance.balance(), &ccy)
    );
    Ok(())
}

fn list(tracker: &Tracker, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let items = tracker.incomings.items();
    if !maybe_print_json(json_flag, jsonl_flag, &items)? {
        let ccy = get_currency_symbol(tracker.connection())?;
        let rows = items
            .iter()
            .map(|i| {
                vec![
                    i.id.to_string(),
                    i.name.clone(),
                    fmt_money(&i.amount, &ccy),
                    i.note.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Id", "Name", "Amount", "Note"], rows));
        println!("Total: {}", fmt_money(&tracker.incomings.total()?, &ccy));
    }
    Ok(())
}

fn remove(tracker: &Tracker, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(arg(sub, "id")?)?;
    let income = tracker.incomings.remove(id)?;
    let ccy = get_currency_symbol(tracker.connection())?;
    println!(
        "Removed income '{}' (balance: {})",
        income.name,
        fmt_money(&tracker.balance.balance(), &ccy)
    );
    Ok(())
}
