// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::decimal_at;
use crate::error::{Result, TrackerError};
use crate::models::{MAIN_ACCOUNT_ID, MainAccount};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

/// The singleton row is created by `db::init`; a missing row is `NotFound`.
pub fn get(conn: &Connection) -> Result<MainAccount> {
    conn.query_row(
        "SELECT id, balance FROM main_account WHERE id=?1",
        params![MAIN_ACCOUNT_ID],
        |r| {
            Ok(MainAccount {
                id: r.get(0)?,
                balance: decimal_at(r, 1)?,
            })
        },
    )
    .optional()?
    .ok_or_else(|| TrackerError::not_found("Main account", MAIN_ACCOUNT_ID))
}

/// Stores the value as given. Clamping at zero is the balance service's job.
pub fn set_balance(conn: &Connection, balance: Decimal) -> Result<()> {
    conn.execute(
        "INSERT INTO main_account(id, balance) VALUES (?1, ?2)
         ON CONFLICT(id) DO UPDATE SET balance=excluded.balance",
        params![MAIN_ACCOUNT_ID, balance.to_string()],
    )?;
    Ok(())
}
