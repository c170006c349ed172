// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Monthly close.
//!
//! The stored system period records the last month for which the close has
//! run. When the calendar has moved past it, every monthly-reset virtual
//! account is snapshotted into a report for the month that just ended, its
//! live expenses are copied into the history table, and the account is
//! zeroed. Reports, history, reset and the period advance share one outer
//! transaction, each batch in its own savepoint, so a failure anywhere leaves
//! the store exactly as it was and the same month is retried next time.
//!
//! Only one closing month is produced per run, even if the app was not opened
//! for several months: the spending of the skipped months lands in that
//! single report.

use crate::clock::Clock;
use crate::error::{Result, TrackerError};
use crate::models::{HistoricalExpense, Period, Report};
use crate::repo::{expenses, period, reports, virtual_accounts};
use crate::state::events::{DomainEvent, EventBus};
use rusqlite::Connection;
use serde::Serialize;
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, error, info};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RolloverSummary {
    pub closed: Period,
    pub current: Period,
    pub account_ids: Vec<i64>,
    pub reports: usize,
    pub archived_expenses: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RolloverOutcome {
    NotDue { stored: Period },
    Completed(RolloverSummary),
}

pub struct RolloverEngine {
    conn: Rc<Connection>,
    clock: Rc<dyn Clock>,
    bus: Rc<EventBus>,
    in_flight: Cell<bool>,
}

impl RolloverEngine {
    pub fn new(conn: Rc<Connection>, clock: Rc<dyn Clock>, bus: Rc<EventBus>) -> Self {
        RolloverEngine {
            conn,
            clock,
            bus,
            in_flight: Cell::new(false),
        }
    }

    pub fn current_period(&self) -> Period {
        Period::from_date(self.clock.today())
    }

    pub fn stored_period(&self) -> Result<Period> {
        period::get(&self.conn)
    }

    /// True when today's month is strictly later than the stored one.
    pub fn is_rollover_due(&self) -> Result<bool> {
        Ok(self.current_period() > self.stored_period()?)
    }

    /// Closes the previous month if due. Calling it again in the same month
    /// returns `NotDue` and touches nothing.
    ///
    /// The guard stays held while `RolloverCompleted` subscribers run, so a
    /// subscriber that calls back in gets `RolloverInFlight`.
    pub fn perform_rollover(&self) -> Result<RolloverOutcome> {
        if self.in_flight.replace(true) {
            return Err(TrackerError::RolloverInFlight);
        }
        let result = self.close_period();
        self.announce(&result);
        self.in_flight.set(false);
        result
    }

    fn announce(&self, result: &Result<RolloverOutcome>) {
        match result {
            Ok(RolloverOutcome::Completed(summary)) => {
                info!(
                    closed = %summary.closed,
                    current = %summary.current,
                    reports = summary.reports,
                    archived = summary.archived_expenses,
                    "monthly rollover completed"
                );
                self.bus
                    .publish(DomainEvent::RolloverCompleted(summary.clone()));
            }
            Ok(RolloverOutcome::NotDue { stored }) => {
                debug!(stored = %stored, "rollover not due");
            }
            Err(e) => {
                error!(error = %e, "monthly rollover failed, period marker left unchanged");
            }
        }
    }

    /// Entry point for a cold start, before balances are loaded.
    pub fn run_on_startup(&self) -> Result<RolloverOutcome> {
        if !self.is_rollover_due()? {
            return Ok(RolloverOutcome::NotDue {
                stored: self.stored_period()?,
            });
        }
        self.perform_rollover()
    }

    fn close_period(&self) -> Result<RolloverOutcome> {
        let stored = period::get(&self.conn)?;
        let current = self.current_period();
        if current <= stored {
            return Ok(RolloverOutcome::NotDue { stored });
        }
        let closing = current.previous();

        // Dropping `tx` without commit rolls everything back.
        let tx = self.conn.unchecked_transaction()?;

        let accounts = virtual_accounts::list_monthly_reset(&tx)?;
        let mut snapshots = Vec::with_capacity(accounts.len());
        let mut history = Vec::new();
        let mut ids = Vec::with_capacity(accounts.len());
        for account in &accounts {
            if account.id <= 0 {
                return Err(TrackerError::ConsistencyGuard(format!(
                    "monthly-reset account '{}' has no valid id ({})",
                    account.name, account.id
                )));
            }
            snapshots.push(Report::snapshot(account, closing));
            for expense in expenses::list(&tx, account.id)? {
                history.push(HistoricalExpense::archive(&expense, closing));
            }
            ids.push(account.id);
        }

        reports::insert_all(&tx, &snapshots)?;
        reports::insert_history(&tx, &history)?;
        virtual_accounts::reset(&tx, &ids)?;
        period::set(&tx, current)?;
        tx.commit()?;

        Ok(RolloverOutcome::Completed(RolloverSummary {
            closed: closing,
            current,
            account_ids: ids,
            reports: snapshots.len(),
            archived_expenses: history.len(),
        }))
    }
}
