// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{NewVirtualAccount, VirtualAccount};
use crate::repo::settings::get_currency_symbol;
use crate::state::Tracker;
use crate::utils::{
    arg, fmt_money, json_flags, maybe_print_json, parse_decimal, parse_id, pretty_table,
};
use anyhow::Result;

pub fn handle(tracker: &Tracker, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(tracker, sub)?,
        Some(("list", sub)) => list(tracker, sub)?,
        Some(("show", sub)) => show(tracker, sub)?,
        Some(("rename", sub)) => {
            let id = parse_id(arg(sub, "id")?)?;
            let name = arg(sub, "name")?;
            tracker.detail.update_name(id, name)?;
            println!("Renamed account #{} to '{}'", id, name);
        }
        Some(("limit", sub)) => {
            let id = parse_id(arg(sub, "id")?)?;
            let limit = parse_decimal(arg(sub, "amount")?)?;
            tracker.detail.update_limit(id, limit)?;
            let ccy = get_currency_symbol(tracker.connection())?;
            println!("Limit of account #{} set to {}", id, fmt_money(&limit, &ccy));
        }
        Some(("rm", sub)) => {
            let id = parse_id(arg(sub, "id")?)?;
            tracker.accounts.delete(id)?;
            println!("Removed account #{} with its expenses and reports", id);
        }
        _ => {}
    }
    Ok(())
}

fn add(tracker: &Tracker, sub: &clap::ArgMatches) -> Result<()> {
    let new = NewVirtualAccount {
        name: arg(sub, "name")?.to_string(),
        limit: parse_decimal(arg(sub, "limit")?)?,
        monthly_reset: !sub.get_flag("no-reset"),
    };
    let account = tracker.accounts.insert(new)?;
    let ccy = get_currency_symbol(tracker.connection())?;
    println!(
        "Added account #{} '{}' with limit {}{}",
        account.id,
        account.name,
        fmt_money(&account.limit, &ccy),
        if account.monthly_reset {
            ""
        } else {
            " (no monthly reset)"
        }
    );
    Ok(())
}

pub fn account_row(a: &VirtualAccount, ccy: &str) -> Vec<String> {
    vec![
        a.id.to_string(),
        a.name.clone(),
        fmt_money(&a.limit, ccy),
        fmt_money(&a.total_spent, ccy),
        fmt_money(&a.remaining(), ccy),
        format!("{:.0}%", a.usage_percent().round_dp(0)),
        if a.monthly_reset { "yes" } else { "no" }.to_string(),
    ]
}

pub const ACCOUNT_HEADERS: [&str; 7] = ["Id", "Name", "Limit", "Spent", "Remaining", "Used", "Monthly"];

fn list(tracker: &Tracker, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let accounts = tracker.accounts.accounts();
    if !maybe_print_json(json_flag, jsonl_flag, &accounts)? {
        let ccy = get_currency_symbol(tracker.connection())?;
        let rows = accounts.iter().map(|a| account_row(a, &ccy)).collect();
        println!("{}", pretty_table(&ACCOUNT_HEADERS, rows));
    }
    Ok(())
}

fn show(tracker: &Tracker, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let id = parse_id(arg(sub, "id")?)?;
    let detail = tracker.detail.load(id)?;
    if !maybe_print_json(json_flag, jsonl_flag, &detail)? {
        let ccy = get_currency_symbol(tracker.connection())?;
        println!(
            "{}",
            pretty_table(&ACCOUNT_HEADERS, vec![account_row(&detail.account, &ccy)])
        );
        if detail.account.is_over_limit() {
            println!("Over limit by {}", fmt_money(&-detail.account.remaining(), &ccy));
        }
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
