// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Period;
use crate::repo::{expenses, main_account, period, virtual_accounts};
use crate::utils::pretty_table;
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, today: NaiveDate) -> Result<()> {
    let rows = find_issues(conn, today)?;
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

pub fn find_issues(conn: &Connection, today: NaiveDate) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();

    // 1) Stored totals that no longer match the live expenses
    for acct in virtual_accounts::list(conn)? {
        let live = expenses::sum_live(conn, acct.id)?;
        if live != acct.total_spent {
            rows.push(vec![
                "total_spent_drift".into(),
                format!(
                    "#{} '{}': stored {} vs expenses {}",
                    acct.id, acct.name, acct.total_spent, live
                ),
            ]);
        }
    }

    // 2) Balance below zero (written by something other than the balance service)
    let balance = main_account::get(conn)?.balance;
    if balance < Decimal::ZERO {
        rows.push(vec!["negative_balance".into(), balance.to_string()]);
    }

    // 3) Period marker against the calendar
    let stored = period::get(conn)?;
    let current = Period::from_date(today);
    if stored > current {
        rows.push(vec![
            "period_in_future".into(),
            format!("stored {} is after {}", stored, current),
        ]);
    } else if stored < current {
        rows.push(vec![
            "rollover_pending".into(),
            format!("{} not closed yet", current.previous()),
        ]);
    }

    Ok(rows)
}
