// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Persistence operations. Every function takes a plain `&Connection`, so a
//! caller can run several of them inside one transaction and they commit or
//! roll back together.

pub mod expenses;
pub mod incomings;
pub mod main_account;
pub mod period;
pub mod reports;
pub mod settings;
pub mod virtual_accounts;

use crate::error::Result;
use rusqlite::types::Type;
use rusqlite::{Connection, Row};
use rust_decimal::Decimal;
use tracing::warn;

/// Amounts are stored as TEXT to keep exact decimal values.
pub(crate) fn decimal_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let raw: String = row.get(idx)?;
    raw.trim()
        .parse::<Decimal>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Runs `f` inside a named SAVEPOINT. Works both at top level (where it
/// behaves like a transaction) and nested inside an open transaction.
pub(crate) fn atomically<T>(
    conn: &Connection,
    name: &str,
    f: impl FnOnce(&Connection) -> Result<T>,
) -> Result<T> {
    conn.execute_batch(&format!("SAVEPOINT {name}"))?;
    match f(conn) {
        Ok(value) => {
            conn.execute_batch(&format!("RELEASE {name}"))?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rb) = conn.execute_batch(&format!("ROLLBACK TO {name}; RELEASE {name}")) {
                warn!(savepoint = name, error = %rb, "rollback failed");
            }
            Err(err)
        }
    }
}

pub(crate) fn ensure_affected(
    affected: usize,
    entity: &'static str,
    id: i64,
) -> Result<()> {
    if affected == 0 {
        Err(crate::error::TrackerError::not_found(entity, id))
    } else {
        Ok(())
    }
}
