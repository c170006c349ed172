// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{Result, TrackerError};
use crate::models::Period;
use rusqlite::{Connection, OptionalExtension, params};

/// Last period for which rollover processing has run.
pub fn get(conn: &Connection) -> Result<Period> {
    let row: Option<(u32, i32)> = conn
        .query_row(
            "SELECT month, year FROM system_period WHERE id=1",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .optional()?;
    let (month, year) = row.ok_or_else(|| TrackerError::not_found("System period", 1))?;
    Period::new(month, year)
        .map_err(|_| TrackerError::ConsistencyGuard(format!("stored period {year}-{month} is invalid")))
}

pub fn set(conn: &Connection, period: Period) -> Result<()> {
    conn.execute(
        "INSERT INTO system_period(id, month, year) VALUES (1, ?1, ?2)
         ON CONFLICT(id) DO UPDATE SET month=excluded.month, year=excluded.year",
        params![period.month, period.year],
    )?;
    Ok(())
}
