// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Monthly reports and the archived expenses that belong to them. Rows here
//! are written only by the rollover engine and never updated.

use super::{atomically, decimal_at};
use crate::error::{Result, TrackerError};
use crate::models::{HistoricalExpense, Period, Report};
use rusqlite::{Connection, OptionalExtension, Row, params};

const REPORT_COLUMNS: &str = "month, year, virtual_account_id, limit_amount, name, total_spent";

fn report_from_row(r: &Row<'_>) -> rusqlite::Result<Report> {
    Ok(Report {
        month: r.get(0)?,
        year: r.get(1)?,
        virtual_account_id: r.get(2)?,
        limit: decimal_at(r, 3)?,
        name: r.get(4)?,
        total_spent: decimal_at(r, 5)?,
    })
}

/// Newest period first.
pub fn list(conn: &Connection, virtual_account_id: i64) -> Result<Vec<Report>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {REPORT_COLUMNS} FROM reports WHERE virtual_account_id=?1
         ORDER BY year DESC, month DESC"
    ))?;
    let rows = stmt.query_map(params![virtual_account_id], report_from_row)?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    Ok(data)
}

pub fn find(conn: &Connection, period: Period, virtual_account_id: i64) -> Result<Option<Report>> {
    let report = conn
        .query_row(
            &format!(
                "SELECT {REPORT_COLUMNS} FROM reports
                 WHERE month=?1 AND year=?2 AND virtual_account_id=?3"
            ),
            params![period.month, period.year, virtual_account_id],
            report_from_row,
        )
        .optional()?;
    Ok(report)
}

/// All-or-nothing: one bad row discards the whole batch.
pub fn insert_all(conn: &Connection, reports: &[Report]) -> Result<()> {
    atomically(conn, "insert_reports", |c| {
        let mut insert = c.prepare_cached(
            "INSERT INTO reports(month, year, virtual_account_id, limit_amount, name, total_spent)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        for report in reports {
            if report.virtual_account_id <= 0 {
                return Err(TrackerError::ConsistencyGuard(format!(
                    "virtual account '{}' has no valid id ({})",
                    report.name, report.virtual_account_id
                )));
            }
            insert.execute(params![
                report.month,
                report.year,
                report.virtual_account_id,
                report.limit.to_string(),
                report.name,
                report.total_spent.to_string()
            ])?;
        }
        Ok(())
    })
}

pub fn list_history(
    conn: &Connection,
    period: Period,
    virtual_account_id: i64,
) -> Result<Vec<HistoricalExpense>> {
    let mut stmt = conn.prepare(
        "SELECT expense_id, name, note, amount, virtual_account_id, month, year, date
         FROM historical_expenses
         WHERE month=?1 AND year=?2 AND virtual_account_id=?3
         ORDER BY date, expense_id",
    )?;
    let rows = stmt.query_map(params![period.month, period.year, virtual_account_id], |r| {
        Ok(HistoricalExpense {
            expense_id: r.get(0)?,
            name: r.get(1)?,
            note: r.get(2)?,
            amount: decimal_at(r, 3)?,
            virtual_account_id: r.get(4)?,
            month: r.get(5)?,
            year: r.get(6)?,
            date: r.get(7)?,
        })
    })?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    Ok(data)
}

/// All-or-nothing. Each row needs its report to exist already.
pub fn insert_history(conn: &Connection, expenses: &[HistoricalExpense]) -> Result<()> {
    atomically(conn, "insert_history", |c| {
        let mut insert = c.prepare_cached(
            "INSERT INTO historical_expenses(expense_id, name, note, amount, virtual_account_id, month, year, date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )?;
        for e in expenses {
            if e.expense_id <= 0 {
                return Err(TrackerError::ConsistencyGuard(format!(
                    "expense '{}' has no valid id ({})",
                    e.name, e.expense_id
                )));
            }
            insert.execute(params![
                e.expense_id,
                e.name,
                e.note,
                e.amount.to_string(),
                e.virtual_account_id,
                e.month,
                e.year,
                e.date
            ])?;
        }
        Ok(())
    })
}
