// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::repo::settings::get_currency_symbol;
use crate::state::Tracker;
use crate::utils::{arg, fmt_money, parse_decimal};
use anyhow::Result;

pub fn handle(tracker: &Tracker, m: &clap::ArgMatches) -> Result<()> {
    let ccy = get_currency_symbol(tracker.connection())?;
    match m.subcommand() {
        Some(("set", sub)) => {
            let amount = parse_decimal(arg(sub, "amount")?)?;
            let stored = tracker.balance.set_balance(amount)?;
            if stored != amount {
                println!("Balance cannot be negative, stored {}", fmt_money(&stored, &ccy));
            } else {
                println!("Balance set to {}", fmt_money(&stored, &ccy));
            }
        }
        _ => {
            println!("Balance: {}", fmt_money(&tracker.balance.balance(), &ccy));
        }
    }
    Ok(())
}
