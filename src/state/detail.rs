// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::balance::apply_delta;
use super::events::{DomainEvent, EventBus, Subscriber};
use super::{in_transaction, logged, out_of_range, require_name, require_positive};
use crate::error::{Result, TrackerError};
use crate::models::{Expense, NewExpense, VirtualAccount};
use crate::repo::{expenses, virtual_accounts};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::error;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountDetail {
    pub account: VirtualAccount,
    pub expenses: Vec<Expense>,
}

/// The one virtual account currently opened for editing.
///
/// Every write here also touches the account's `total_spent` and the main
/// balance inside the same transaction, then announces `AccountUpdated` so
/// the list view reloads, and `BalanceChanged` so the balance view follows.
pub struct VirtualAccountDetail {
    conn: Rc<Connection>,
    bus: Rc<EventBus>,
    selected: RefCell<Option<AccountDetail>>,
}

impl VirtualAccountDetail {
    pub fn new(conn: Rc<Connection>, bus: Rc<EventBus>) -> Self {
        VirtualAccountDetail {
            conn,
            bus,
            selected: RefCell::new(None),
        }
    }

    pub fn current(&self) -> Option<AccountDetail> {
        self.selected.borrow().clone()
    }

    pub fn selected_id(&self) -> Option<i64> {
        self.selected.borrow().as_ref().map(|d| d.account.id)
    }

    pub fn load(&self, id: i64) -> Result<AccountDetail> {
        let detail = logged("load account detail", self.fetch(id))?;
        *self.selected.borrow_mut() = Some(detail.clone());
        Ok(detail)
    }

    pub fn clear(&self) {
        self.selected.borrow_mut().take();
    }

    pub fn update_name(&self, id: i64, name: &str) -> Result<()> {
        let name = logged("rename account", require_name(name))?;
        logged(
            "rename account",
            virtual_accounts::update_name(&self.conn, id, &name),
        )?;
        self.with_selected(id, |d| d.account.name = name);
        self.bus.publish(DomainEvent::AccountUpdated { id });
        Ok(())
    }

    pub fn update_limit(&self, id: i64, limit: Decimal) -> Result<()> {
        logged("update limit", require_positive("Limit", limit))?;
        logged(
            "update limit",
            virtual_accounts::update_limit(&self.conn, id, limit),
        )?;
        self.with_selected(id, |d| d.account.limit = limit);
        self.bus.publish(DomainEvent::AccountUpdated { id });
        Ok(())
    }

    pub fn insert_expense(&self, new: NewExpense) -> Result<Expense> {
        let name = logged("insert expense", require_name(&new.name))?;
        logged("insert expense", require_positive("Expense amount", new.amount))?;
        let new = NewExpense {
            name,
            note: new.note.filter(|n| !n.trim().is_empty()),
            ..new
        };
        let owner = new.virtual_account_id;

        let (expense, total, balance) = logged(
            "insert expense",
            in_transaction(&self.conn, |c| {
                let account = virtual_accounts::get(c, owner)?;
                let total = account
                    .total_spent
                    .checked_add(new.amount)
                    .ok_or_else(|| out_of_range("Total spent"))?;
                let id = expenses::insert(c, &new)?;
                virtual_accounts::update_total_spent(c, owner, total)?;
                let balance = apply_delta(c, -new.amount)?;
                Ok((expenses::get(c, id)?, total, balance))
            }),
        )?;

        self.with_selected(owner, |d| {
            d.expenses.push(expense.clone());
            d.account.total_spent = total;
        });
        self.bus.publish(DomainEvent::AccountUpdated { id: owner });
        self.bus.publish(DomainEvent::BalanceChanged { balance });
        Ok(expense)
    }

    pub fn delete_expense(&self, id: i64) -> Result<Expense> {
        let (expense, total, balance) = logged(
            "delete expense",
            in_transaction(&self.conn, |c| {
                let expense = expenses::get(c, id)?;
                let account = virtual_accounts::get(c, expense.virtual_account_id)?;
                expenses::delete(c, id)?;
                let total = account
                    .total_spent
                    .checked_sub(expense.amount)
                    .ok_or_else(|| out_of_range("Total spent"))?;
                if total < Decimal::ZERO {
                    return Err(TrackerError::ConsistencyGuard(format!(
                        "total spent of account {} would drop below zero",
                        account.id
                    )));
                }
                virtual_accounts::update_total_spent(c, account.id, total)?;
                let balance = apply_delta(c, expense.amount)?;
                Ok((expense, total, balance))
            }),
        )?;

        let owner = expense.virtual_account_id;
        self.with_selected(owner, |d| {
            d.expenses.retain(|e| e.id != id);
            d.account.total_spent = total;
        });
        self.bus.publish(DomainEvent::AccountUpdated { id: owner });
        self.bus.publish(DomainEvent::BalanceChanged { balance });
        Ok(expense)
    }

    fn fetch(&self, id: i64) -> Result<AccountDetail> {
        let account = virtual_accounts::get(&self.conn, id)?;
        let expenses = expenses::list(&self.conn, id)?;
        Ok(AccountDetail { account, expenses })
    }

    fn with_selected(&self, id: i64, f: impl FnOnce(&mut AccountDetail)) {
        if let Some(detail) = self.selected.borrow_mut().as_mut() {
            if detail.account.id == id {
                f(detail);
            }
        }
    }
}

impl Subscriber for VirtualAccountDetail {
    fn on_event(&self, event: &DomainEvent) {
        match event {
            DomainEvent::AccountDeleted { id } if self.selected_id() == Some(*id) => self.clear(),
            DomainEvent::RolloverCompleted(summary) => {
                let Some(id) = self.selected_id() else {
                    return;
                };
                if summary.account_ids.contains(&id) {
                    match self.fetch(id) {
                        Ok(detail) => *self.selected.borrow_mut() = Some(detail),
                        Err(e) => error!(account = id, error = %e, "detail reload after rollover failed"),
                    }
                }
            }
            _ => {}
        }
    }
}
