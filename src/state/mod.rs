// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! In-memory services the front end reads from.
//!
//! Each service writes to the store first and updates its own copy only once
//! the write has committed. A failed operation is logged and returned, and
//! the in-memory copy keeps its last good value. Services never call each
//! other: they publish `DomainEvent`s on a shared `EventBus`, and whoever
//! needs to follow along subscribes.

pub mod accounts;
pub mod balance;
pub mod detail;
pub mod events;
pub mod incomings;

use crate::clock::Clock;
use crate::error::{Result, TrackerError};
use crate::rollover::{RolloverEngine, RolloverOutcome};
use accounts::VirtualAccounts;
use balance::MainBalance;
use chrono::NaiveDate;
use detail::VirtualAccountDetail;
use events::{EventBus, Subscriber};
use incomings::Incomings;
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::rc::Rc;
use tracing::{debug, error, warn};

/// Owns the store handle and wires the services to one event bus.
pub struct Tracker {
    conn: Rc<Connection>,
    clock: Rc<dyn Clock>,
    bus: Rc<EventBus>,
    pub balance: Rc<MainBalance>,
    pub incomings: Rc<Incomings>,
    pub accounts: Rc<VirtualAccounts>,
    pub detail: Rc<VirtualAccountDetail>,
    pub rollover: Rc<RolloverEngine>,
}

/// What a cold start did. The rollover commits on its own, so its outcome
/// stands even when the cache loads that follow it fail.
#[derive(Debug)]
pub struct Startup {
    pub rollover: Result<RolloverOutcome>,
    pub load: Result<()>,
}

impl Startup {
    /// Both steps succeeded; otherwise the first error, rollover first.
    pub fn into_result(self) -> Result<RolloverOutcome> {
        let outcome = self.rollover?;
        self.load?;
        Ok(outcome)
    }
}

impl Tracker {
    pub fn new(conn: Connection, clock: Rc<dyn Clock>) -> Self {
        let conn = Rc::new(conn);
        let bus = Rc::new(EventBus::new());

        let balance = Rc::new(MainBalance::new(conn.clone(), bus.clone()));
        let incomings = Rc::new(Incomings::new(conn.clone(), bus.clone()));
        let accounts = Rc::new(VirtualAccounts::new(conn.clone(), bus.clone()));
        let detail = Rc::new(VirtualAccountDetail::new(conn.clone(), bus.clone()));
        let rollover = Rc::new(RolloverEngine::new(conn.clone(), clock.clone(), bus.clone()));

        let balance_sub: Rc<dyn Subscriber> = balance.clone();
        let accounts_sub: Rc<dyn Subscriber> = accounts.clone();
        let detail_sub: Rc<dyn Subscriber> = detail.clone();
        bus.subscribe(Rc::downgrade(&balance_sub));
        bus.subscribe(Rc::downgrade(&accounts_sub));
        bus.subscribe(Rc::downgrade(&detail_sub));

        Tracker {
            conn,
            clock,
            bus,
            balance,
            incomings,
            accounts,
            detail,
            rollover,
        }
    }

    /// Cold start: close the previous month if due, then load the caches.
    /// The loads run whatever the rollover outcome was.
    pub fn startup(&self) -> Startup {
        let rollover = self.rollover.run_on_startup();
        let load = self.load_caches();
        Startup { rollover, load }
    }

    pub fn load_caches(&self) -> Result<()> {
        self.balance.load()?;
        self.incomings.load()?;
        self.accounts.load()?;
        Ok(())
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn bus(&self) -> &Rc<EventBus> {
        &self.bus
    }
}

/// Logs the failure at a level matching its kind and hands it back.
pub(crate) fn logged<T>(op: &'static str, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        match e {
            TrackerError::Validation(_) => debug!(op, error = %e, "rejected"),
            TrackerError::NotFound { .. } => warn!(op, error = %e, "operation did not apply"),
            _ => error!(op, error = %e, "operation did not apply"),
        }
    }
    result
}

pub(crate) fn in_transaction<T>(
    conn: &Connection,
    f: impl FnOnce(&Connection) -> Result<T>,
) -> Result<T> {
    let tx = conn.unchecked_transaction()?;
    let out = f(&tx)?;
    tx.commit()?;
    Ok(out)
}

pub(crate) fn require_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(TrackerError::validation("Name must not be empty"));
    }
    Ok(name.to_string())
}

/// Amount arithmetic that left the range `Decimal` can represent.
pub(crate) fn out_of_range(what: &str) -> TrackerError {
    TrackerError::validation(format!("{} is out of the supported amount range", what))
}

pub(crate) fn require_positive(what: &str, amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(TrackerError::validation(format!(
            "{} must be greater than 0 (got {})",
            what, amount
        )));
    }
    Ok(())
}
