// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::rollover::{RolloverOutcome, RolloverSummary};
use crate::state::Tracker;
use anyhow::Result;

pub fn handle(tracker: &Tracker, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("run", _)) => match tracker.rollover.perform_rollover()? {
            RolloverOutcome::Completed(summary) => print_summary(&summary),
            RolloverOutcome::NotDue { stored } => {
                println!("Nothing to close, {} is already the current period", stored)
            }
        },
        _ => {
            let stored = tracker.rollover.stored_period()?;
            let current = tracker.rollover.current_period();
            let due = tracker.rollover.is_rollover_due()?;
            println!("Stored period:  {}", stored);
            println!("Current period: {}", current);
            println!(
                "Rollover due:   {}",
                if due {
                    format!("yes, will close {}", current.previous())
                } else {
                    "no".to_string()
                }
            );
        }
    }
    Ok(())
}

pub fn print_summary(summary: &RolloverSummary) {
    println!(
        "Closed {}: {} report(s), {} expense(s) archived; now in {}",
        summary.closed, summary.reports, summary.archived_expenses, summary.current
    );
}
