// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use chrono::NaiveDate;
use moneyjar::Tracker;
use moneyjar::clock::FixedClock;
use moneyjar::db;
use moneyjar::models::{NewExpense, NewVirtualAccount, VirtualAccount};
use rust_decimal::Decimal;
use std::rc::Rc;

pub fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Fresh in-memory store whose period marker is seeded from `today`, with
/// every cache loaded.
pub fn tracker_at(y: i32, m: u32, d: u32) -> (Tracker, Rc<FixedClock>) {
    let clock = Rc::new(FixedClock::ymd(y, m, d));
    let conn = db::open_in_memory(clock.as_ref()).unwrap();
    let tracker = Tracker::new(conn, clock.clone());
    tracker.startup().into_result().unwrap();
    (tracker, clock)
}

pub fn envelope(tracker: &Tracker, name: &str, limit: &str, monthly_reset: bool) -> VirtualAccount {
    tracker
        .accounts
        .insert(NewVirtualAccount {
            name: name.into(),
            limit: dec(limit),
            monthly_reset,
        })
        .unwrap()
}

pub fn spend(tracker: &Tracker, account_id: i64, name: &str, amount: &str, on: NaiveDate) -> i64 {
    tracker
        .detail
        .insert_expense(NewExpense {
            name: name.into(),
            note: None,
            amount: dec(amount),
            virtual_account_id: account_id,
            date: on,
        })
        .unwrap()
        .id
}

pub fn count(tracker: &Tracker, table: &str) -> i64 {
    tracker
        .connection()
        .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))
        .unwrap()
}
