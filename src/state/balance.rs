// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::events::{DomainEvent, EventBus, Subscriber};
use super::{logged, out_of_range};
use crate::error::Result;
use crate::repo::main_account;
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::cell::Cell;
use std::rc::Rc;
use tracing::debug;

/// The balance never goes below zero.
pub fn clamp_balance(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Applies `delta` to the persisted balance, clamped. Meant to run inside the
/// caller's transaction so the balance moves together with the row that
/// caused it.
pub(crate) fn apply_delta(conn: &Connection, delta: Decimal) -> Result<Decimal> {
    let current = main_account::get(conn)?.balance;
    let next = current
        .checked_add(delta)
        .map(clamp_balance)
        .ok_or_else(|| out_of_range("Balance"))?;
    main_account::set_balance(conn, next)?;
    Ok(next)
}

pub struct MainBalance {
    conn: Rc<Connection>,
    bus: Rc<EventBus>,
    balance: Cell<Decimal>,
}

impl MainBalance {
    pub fn new(conn: Rc<Connection>, bus: Rc<EventBus>) -> Self {
        MainBalance {
            conn,
            bus,
            balance: Cell::new(Decimal::ZERO),
        }
    }

    pub fn balance(&self) -> Decimal {
        self.balance.get()
    }

    pub fn load(&self) -> Result<Decimal> {
        let acct = logged("load balance", main_account::get(&self.conn))?;
        self.balance.set(acct.balance);
        debug!(balance = %acct.balance, "balance loaded");
        Ok(acct.balance)
    }

    /// Negative input is stored as zero.
    pub fn set_balance(&self, value: Decimal) -> Result<Decimal> {
        let value = clamp_balance(value);
        logged(
            "set balance",
            main_account::set_balance(&self.conn, value),
        )?;
        self.balance.set(value);
        self.bus.publish(DomainEvent::BalanceChanged { balance: value });
        Ok(value)
    }
}

impl Subscriber for MainBalance {
    fn on_event(&self, event: &DomainEvent) {
        if let DomainEvent::BalanceChanged { balance } = event {
            self.balance.set(*balance);
        }
    }
}
