// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{decimal_at, ensure_affected};
use crate::error::{Result, TrackerError};
use crate::models::{Expense, NewExpense};
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;

const COLUMNS: &str = "id, name, note, amount, virtual_account_id, date";

fn from_row(r: &Row<'_>) -> rusqlite::Result<Expense> {
    Ok(Expense {
        id: r.get(0)?,
        name: r.get(1)?,
        note: r.get(2)?,
        amount: decimal_at(r, 3)?,
        virtual_account_id: r.get(4)?,
        date: r.get(5)?,
    })
}

pub fn list(conn: &Connection, virtual_account_id: i64) -> Result<Vec<Expense>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM expenses WHERE virtual_account_id=?1 ORDER BY date, id"
    ))?;
    let rows = stmt.query_map(params![virtual_account_id], from_row)?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    Ok(data)
}

pub fn get(conn: &Connection, id: i64) -> Result<Expense> {
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM expenses WHERE id=?1"),
        params![id],
        from_row,
    )
    .optional()?
    .ok_or_else(|| TrackerError::not_found("Expense", id))
}

pub fn insert(conn: &Connection, new: &NewExpense) -> Result<i64> {
    conn.execute(
        "INSERT INTO expenses(name, note, amount, virtual_account_id, date)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            new.name,
            new.note,
            new.amount.to_string(),
            new.virtual_account_id,
            new.date
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn delete(conn: &Connection, id: i64) -> Result<()> {
    let n = conn.execute("DELETE FROM expenses WHERE id=?1", params![id])?;
    ensure_affected(n, "Expense", id)
}

/// Recomputed from the live rows; `total_spent` must always agree with it.
pub fn sum_live(conn: &Connection, virtual_account_id: i64) -> Result<Decimal> {
    let mut stmt = conn.prepare_cached("SELECT amount FROM expenses WHERE virtual_account_id=?1")?;
    let mut rows = stmt.query(params![virtual_account_id])?;
    let mut total = Decimal::ZERO;
    while let Some(r) = rows.next()? {
        total = total.checked_add(decimal_at(r, 0)?).ok_or_else(|| {
            TrackerError::ConsistencyGuard(format!(
                "live expenses of account {} exceed the supported amount range",
                virtual_account_id
            ))
        })?;
    }
    Ok(total)
}
