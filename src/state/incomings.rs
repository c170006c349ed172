// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::balance::apply_delta;
use super::events::{DomainEvent, EventBus};
use super::{in_transaction, logged, out_of_range, require_name, require_positive};
use crate::error::Result;
use crate::models::{Incoming, MAIN_ACCOUNT_ID};
use crate::repo::incomings;
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::cell::RefCell;
use std::rc::Rc;

pub struct Incomings {
    conn: Rc<Connection>,
    bus: Rc<EventBus>,
    items: RefCell<Vec<Incoming>>,
}

impl Incomings {
    pub fn new(conn: Rc<Connection>, bus: Rc<EventBus>) -> Self {
        Incomings {
            conn,
            bus,
            items: RefCell::new(Vec::new()),
        }
    }

    pub fn items(&self) -> Vec<Incoming> {
        self.items.borrow().clone()
    }

    pub fn total(&self) -> Result<Decimal> {
        self.items
            .borrow()
            .iter()
            .try_fold(Decimal::ZERO, |acc, i| acc.checked_add(i.amount))
            .ok_or_else(|| out_of_range("Income total"))
    }

    pub fn load(&self) -> Result<()> {
        let rows = logged("load incomings", incomings::list(&self.conn))?;
        *self.items.borrow_mut() = rows;
        Ok(())
    }

    /// Records the income and credits the main balance in one transaction.
    pub fn add(&self, name: &str, note: Option<&str>, amount: Decimal) -> Result<Incoming> {
        let name = logged("add income", require_name(name))?;
        logged("add income", require_positive("Income amount", amount))?;
        let note = note.map(str::trim).filter(|n| !n.is_empty());

        let (id, balance) = logged("add income", in_transaction(&self.conn, |c| {
            let id = incomings::insert(c, &name, note, amount)?;
            let balance = apply_delta(c, amount)?;
            Ok((id, balance))
        }))?;

        let income = Incoming {
            id,
            name,
            note: note.map(str::to_string),
            amount,
            main_account_id: MAIN_ACCOUNT_ID,
        };
        self.items.borrow_mut().push(income.clone());
        self.bus.publish(DomainEvent::BalanceChanged { balance });
        self.bus.publish(DomainEvent::IncomingsChanged);
        Ok(income)
    }

    /// Deletes the income and debits its amount, stopping at zero.
    pub fn remove(&self, id: i64) -> Result<Incoming> {
        let (income, balance) = logged("remove income", in_transaction(&self.conn, |c| {
            let income = incomings::get(c, id)?;
            incomings::delete(c, id)?;
            let balance = apply_delta(c, -income.amount)?;
            Ok((income, balance))
        }))?;

        self.items.borrow_mut().retain(|i| i.id != id);
        self.bus.publish(DomainEvent::BalanceChanged { balance });
        self.bus.publish(DomainEvent::IncomingsChanged);
        Ok(income)
    }
}
