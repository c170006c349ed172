// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::events::{DomainEvent, EventBus, Subscriber};
use super::{logged, require_name, require_positive};
use crate::error::Result;
use crate::models::{NewVirtualAccount, VirtualAccount};
use crate::repo::virtual_accounts;
use rusqlite::Connection;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, error};

/// List view of every virtual account.
pub struct VirtualAccounts {
    conn: Rc<Connection>,
    bus: Rc<EventBus>,
    accounts: RefCell<Vec<VirtualAccount>>,
}

impl VirtualAccounts {
    pub fn new(conn: Rc<Connection>, bus: Rc<EventBus>) -> Self {
        VirtualAccounts {
            conn,
            bus,
            accounts: RefCell::new(Vec::new()),
        }
    }

    pub fn accounts(&self) -> Vec<VirtualAccount> {
        self.accounts.borrow().clone()
    }

    pub fn get(&self, id: i64) -> Option<VirtualAccount> {
        self.accounts.borrow().iter().find(|a| a.id == id).cloned()
    }

    pub fn load(&self) -> Result<()> {
        let rows = logged("load virtual accounts", virtual_accounts::list(&self.conn))?;
        debug!(count = rows.len(), "virtual accounts loaded");
        *self.accounts.borrow_mut() = rows;
        Ok(())
    }

    /// Validation happens before the store is touched.
    pub fn insert(&self, new: NewVirtualAccount) -> Result<VirtualAccount> {
        let name = logged("insert virtual account", require_name(&new.name))?;
        logged(
            "insert virtual account",
            require_positive("Limit", new.limit),
        )?;
        let new = NewVirtualAccount { name, ..new };

        let id = logged(
            "insert virtual account",
            virtual_accounts::insert(&self.conn, &new),
        )?;
        let account = logged(
            "insert virtual account",
            virtual_accounts::get(&self.conn, id),
        )?;
        self.accounts.borrow_mut().push(account.clone());
        self.bus.publish(DomainEvent::AccountCreated { id });
        Ok(account)
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        logged(
            "delete virtual account",
            virtual_accounts::delete(&self.conn, id),
        )?;
        self.accounts.borrow_mut().retain(|a| a.id != id);
        self.bus.publish(DomainEvent::AccountDeleted { id });
        Ok(())
    }

    fn reload(&self, reason: &str) {
        if let Err(e) = self.load() {
            error!(reason, error = %e, "virtual account list reload failed");
        }
    }
}

impl Subscriber for VirtualAccounts {
    fn on_event(&self, event: &DomainEvent) {
        match event {
            DomainEvent::AccountUpdated { .. } => self.reload("account updated"),
            DomainEvent::RolloverCompleted(_) => self.reload("rollover"),
            _ => {}
        }
    }
}
