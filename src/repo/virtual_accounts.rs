// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{atomically, decimal_at, ensure_affected};
use crate::error::{Result, TrackerError};
use crate::models::{NewVirtualAccount, VirtualAccount};
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;

const COLUMNS: &str = "id, name, limit_amount, total_spent, monthly_reset";

fn from_row(r: &Row<'_>) -> rusqlite::Result<VirtualAccount> {
    Ok(VirtualAccount {
        id: r.get(0)?,
        name: r.get(1)?,
        limit: decimal_at(r, 2)?,
        total_spent: decimal_at(r, 3)?,
        monthly_reset: r.get(4)?,
    })
}

fn query(conn: &Connection, filter: &str) -> Result<Vec<VirtualAccount>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM virtual_accounts {filter} ORDER BY id"
    ))?;
    let rows = stmt.query_map([], from_row)?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    Ok(data)
}

pub fn list(conn: &Connection) -> Result<Vec<VirtualAccount>> {
    query(conn, "")
}

/// Only used by the rollover engine.
pub fn list_monthly_reset(conn: &Connection) -> Result<Vec<VirtualAccount>> {
    query(conn, "WHERE monthly_reset=1")
}

pub fn get(conn: &Connection, id: i64) -> Result<VirtualAccount> {
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM virtual_accounts WHERE id=?1"),
        params![id],
        from_row,
    )
    .optional()?
    .ok_or_else(|| TrackerError::not_found("Virtual account", id))
}

pub fn insert(conn: &Connection, new: &NewVirtualAccount) -> Result<i64> {
    conn.execute(
        "INSERT INTO virtual_accounts(name, limit_amount, total_spent, monthly_reset)
         VALUES (?1, ?2, '0', ?3)",
        params![new.name, new.limit.to_string(), new.monthly_reset],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_name(conn: &Connection, id: i64, name: &str) -> Result<()> {
    let n = conn.execute(
        "UPDATE virtual_accounts SET name=?1 WHERE id=?2",
        params![name, id],
    )?;
    ensure_affected(n, "Virtual account", id)
}

pub fn update_limit(conn: &Connection, id: i64, limit: Decimal) -> Result<()> {
    let n = conn.execute(
        "UPDATE virtual_accounts SET limit_amount=?1 WHERE id=?2",
        params![limit.to_string(), id],
    )?;
    ensure_affected(n, "Virtual account", id)
}

pub fn update_total_spent(conn: &Connection, id: i64, total: Decimal) -> Result<()> {
    let n = conn.execute(
        "UPDATE virtual_accounts SET total_spent=?1 WHERE id=?2",
        params![total.to_string(), id],
    )?;
    ensure_affected(n, "Virtual account", id)
}

/// Expenses, reports and archived history go with it through the
/// foreign-key cascades.
pub fn delete(conn: &Connection, id: i64) -> Result<()> {
    let n = conn.execute("DELETE FROM virtual_accounts WHERE id=?1", params![id])?;
    ensure_affected(n, "Virtual account", id)
}

/// Zeroes `total_spent` and drops the live expenses of every listed account.
/// Either all accounts are reset or none is.
pub fn reset(conn: &Connection, ids: &[i64]) -> Result<()> {
    atomically(conn, "reset_accounts", |c| {
        let mut zero = c.prepare_cached("UPDATE virtual_accounts SET total_spent='0' WHERE id=?1")?;
        let mut purge = c.prepare_cached("DELETE FROM expenses WHERE virtual_account_id=?1")?;
        for &id in ids {
            let n = zero.execute(params![id])?;
            ensure_affected(n, "Virtual account", id)?;
            purge.execute(params![id])?;
        }
        Ok(())
    })
}
