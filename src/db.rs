// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::clock::Clock;
use crate::error::Result;
use crate::models::{MAIN_ACCOUNT_ID, Period};
use anyhow::Context;
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, params};
use std::fs;
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.moneyjar", "Moneyjar", "moneyjar"));

pub const DB_ENV: &str = "MONEYJAR_DB";

/// Resolution order: explicit path, then `MONEYJAR_DB`, then the platform
/// data directory.
pub fn db_path(explicit: Option<&str>) -> anyhow::Result<PathBuf> {
    if let Some(p) = explicit.map(str::trim).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(p));
    }
    if let Ok(p) = std::env::var(DB_ENV) {
        if !p.trim().is_empty() {
            return Ok(PathBuf::from(p.trim()));
        }
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("moneyjar.sqlite"))
}

pub fn open_or_init(path: &Path, clock: &dyn Clock) -> anyhow::Result<Connection> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Create directory {}", parent.display()))?;
    }
    let conn =
        Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
    init(&conn, clock).with_context(|| format!("Initialize DB at {}", path.display()))?;
    Ok(conn)
}

pub fn open_in_memory(clock: &dyn Clock) -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    init(&conn, clock)?;
    Ok(conn)
}

pub fn init(conn: &Connection, clock: &dyn Clock) -> Result<()> {
    init_schema(conn)?;
    seed(conn, Period::from_date(clock.today()))
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS main_account(
        id INTEGER PRIMARY KEY CHECK (id = 1),
        balance TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS incomings(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        note TEXT,
        amount TEXT NOT NULL,
        main_account_id INTEGER NOT NULL DEFAULT 1,
        FOREIGN KEY(main_account_id) REFERENCES main_account(id)
    );

    CREATE TABLE IF NOT EXISTS virtual_accounts(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        total_spent TEXT NOT NULL DEFAULT '0',
        limit_amount TEXT NOT NULL,
        monthly_reset INTEGER NOT NULL DEFAULT 1
    );

    CREATE TABLE IF NOT EXISTS expenses(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        note TEXT,
        amount TEXT NOT NULL,
        virtual_account_id INTEGER NOT NULL,
        date TEXT NOT NULL,
        FOREIGN KEY(virtual_account_id) REFERENCES virtual_accounts(id) ON DELETE CASCADE
    );
    CREATE INDEX IF NOT EXISTS idx_expenses_account ON expenses(virtual_account_id);

    -- limit/name/total_spent are copied at close and never updated
    CREATE TABLE IF NOT EXISTS reports(
        month INTEGER NOT NULL CHECK(month BETWEEN 1 AND 12),
        year INTEGER NOT NULL,
        virtual_account_id INTEGER NOT NULL,
        limit_amount TEXT NOT NULL,
        name TEXT NOT NULL,
        total_spent TEXT NOT NULL,
        PRIMARY KEY(month, year, virtual_account_id),
        FOREIGN KEY(virtual_account_id) REFERENCES virtual_accounts(id) ON DELETE CASCADE
    );

    CREATE TABLE IF NOT EXISTS historical_expenses(
        expense_id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        note TEXT,
        amount TEXT NOT NULL,
        virtual_account_id INTEGER NOT NULL,
        month INTEGER NOT NULL,
        year INTEGER NOT NULL,
        date TEXT NOT NULL,
        FOREIGN KEY(month, year, virtual_account_id)
            REFERENCES reports(month, year, virtual_account_id) ON DELETE CASCADE
    );
    CREATE INDEX IF NOT EXISTS idx_history_report
        ON historical_expenses(month, year, virtual_account_id);

    CREATE TABLE IF NOT EXISTS system_period(
        id INTEGER PRIMARY KEY CHECK (id = 1),
        month INTEGER NOT NULL,
        year INTEGER NOT NULL
    );
    "#,
    )?;
    Ok(())
}

/// Singleton rows. Existing rows are left alone, so this is safe on every start.
fn seed(conn: &Connection, current: Period) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO main_account(id, balance) VALUES (?1, '0')",
        params![MAIN_ACCOUNT_ID],
    )?;
    conn.execute(
        "INSERT OR IGNORE INTO system_period(id, month, year) VALUES (1, ?1, ?2)",
        params![current.month, current.year],
    )?;
    Ok(())
}
