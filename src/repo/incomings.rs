// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{decimal_at, ensure_affected};
use crate::error::{Result, TrackerError};
use crate::models::{Incoming, MAIN_ACCOUNT_ID};
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;

const COLUMNS: &str = "id, name, note, amount, main_account_id";

fn from_row(r: &Row<'_>) -> rusqlite::Result<Incoming> {
    Ok(Incoming {
        id: r.get(0)?,
        name: r.get(1)?,
        note: r.get(2)?,
        amount: decimal_at(r, 3)?,
        main_account_id: r.get(4)?,
    })
}

pub fn list(conn: &Connection) -> Result<Vec<Incoming>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM incomings WHERE main_account_id=?1 ORDER BY id"
    ))?;
    let rows = stmt.query_map(params![MAIN_ACCOUNT_ID], from_row)?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    Ok(data)
}

pub fn get(conn: &Connection, id: i64) -> Result<Incoming> {
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM incomings WHERE id=?1"),
        params![id],
        from_row,
    )
    .optional()?
    .ok_or_else(|| TrackerError::not_found("Incoming", id))
}

pub fn insert(conn: &Connection, name: &str, note: Option<&str>, amount: Decimal) -> Result<i64> {
    conn.execute(
        "INSERT INTO incomings(name, note, amount, main_account_id) VALUES (?1, ?2, ?3, ?4)",
        params![name, note, amount.to_string(), MAIN_ACCOUNT_ID],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn delete(conn: &Connection, id: i64) -> Result<()> {
    let n = conn.execute("DELETE FROM incomings WHERE id=?1", params![id])?;
    ensure_affected(n, "Incoming", id)
}
