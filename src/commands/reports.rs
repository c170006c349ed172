// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Report;
use crate::repo::{reports, settings::get_currency_symbol, virtual_accounts};
use crate::state::Tracker;
use crate::utils::{
    arg, fmt_money, json_flags, maybe_print_json, parse_id, parse_month, pretty_table,
};
use anyhow::Result;

pub fn handle(tracker: &Tracker, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(tracker, sub)?,
        Some(("history", sub)) => history(tracker, sub)?,
        _ => {}
    }
    Ok(())
}

fn list(tracker: &Tracker, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let conn = tracker.connection();
    let account_id = parse_id(arg(sub, "account")?)?;
    virtual_accounts::get(conn, account_id)?;
    let data = reports::list(conn, account_id)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let ccy = get_currency_symbol(conn)?;
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.period().to_string(),
                    r.name.clone(),
                    fmt_money(&r.limit, &ccy),
                    fmt_money(&r.total_spent, &ccy),
                    fmt_money(&(r.limit - r.total_spent), &ccy),
                    format!("{:.0}%", r.usage_percent().round_dp(0)),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Name", "Limit", "Spent", "Remaining", "Used"], rows)
        );
    }
    Ok(())
}

fn history(tracker: &Tracker, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let conn = tracker.connection();
    let account_id = parse_id(arg(sub, "account")?)?;
    let period = parse_month(arg(sub, "month")?)?;
    let data = reports::list_history(conn, period, account_id)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let ccy = get_currency_symbol(conn)?;
        match reports::find(conn, period, account_id)? {
            Some(report) => println!("{}", report_header(&report, &ccy)),
            None => println!("No report for account #{} in {}", account_id, period),
        }
        let rows = data
            .iter()
            .map(|e| {
                vec![
                    e.expense_id.to_string(),
                    e.date.to_string(),
                    e.name.clone(),
                    fmt_money(&e.amount, &ccy),
                    e.note.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Date", "Name", "Amount", "Note"], rows)
        );
    }
    Ok(())
}

pub fn report_header(report: &Report, ccy: &str) -> String {
    format!(
        "{} {}: spent {} of {} ({:.0}%)",
        report.period(),
        report.name,
        fmt_money(&report.total_spent, ccy),
        fmt_money(&report.limit, ccy),
        report.usage_percent().round_dp(0)
    )
}
