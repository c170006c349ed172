// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{Result, TrackerError};
use rusqlite::{Connection, OptionalExtension, params};

pub const DEFAULT_CURRENCY_SYMBOL: &str = "€";

// Display only; amounts carry no currency.
pub fn get_currency_symbol(conn: &Connection) -> Result<String> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key='currency_symbol'",
            [],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v.unwrap_or_else(|| DEFAULT_CURRENCY_SYMBOL.to_string()))
}

pub fn set_currency_symbol(conn: &Connection, symbol: &str) -> Result<()> {
    let symbol = symbol.trim();
    if symbol.is_empty() {
        return Err(TrackerError::validation("Currency symbol must not be empty"));
    }
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('currency_symbol', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![symbol],
    )?;
    Ok(())
}
