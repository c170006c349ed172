// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Local, NaiveDate};
use std::cell::Cell;

/// Source of "today" so the period logic stays deterministic in tests.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Wall clock in the user's local time zone. Month boundaries follow the
/// calendar the user sees, not UTC.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Manually driven clock. `set` moves it, which is how tests simulate the
/// calendar turning over between two app starts.
#[derive(Debug, Clone)]
pub struct FixedClock {
    today: Cell<NaiveDate>,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        FixedClock {
            today: Cell::new(today),
        }
    }

    /// Panics on an impossible calendar date; only meant for test setup.
    pub fn ymd(year: i32, month: u32, day: u32) -> Self {
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .unwrap_or_else(|| panic!("invalid date {year}-{month}-{day}"));
        FixedClock::new(date)
    }

    pub fn set(&self, today: NaiveDate) {
        self.today.set(today);
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today.get()
    }
}
