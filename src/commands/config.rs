// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::repo::settings::{get_currency_symbol, set_currency_symbol};
use crate::utils::opt_arg;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("currency", sub)) = m.subcommand() {
        if let Some(symbol) = opt_arg(sub, "set") {
            set_currency_symbol(conn, symbol)?;
        }
        println!("Currency symbol: {}", get_currency_symbol(conn)?);
    }
    Ok(())
}
