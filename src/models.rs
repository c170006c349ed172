// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{Result, TrackerError};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MAIN_ACCOUNT_ID: i64 = 1;

/// `part` as a percentage of `whole`; 0 when `whole` is not positive.
/// Saturates instead of overflowing for extreme ratios.
fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::MAX)
}

/// A calendar month. Field order matters: the derived `Ord` compares the
/// year first, then the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    pub fn new(month: u32, year: i32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(TrackerError::validation(format!(
                "Invalid month {}, expected 1-12",
                month
            )));
        }
        Ok(Period { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Period {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The month that ended right before this one.
    pub fn previous(self) -> Self {
        if self.month == 1 {
            Period {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Period {
                year: self.year,
                month: self.month - 1,
            }
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainAccount {
    pub id: i64,
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incoming {
    pub id: i64,
    pub name: String,
    pub note: Option<String>,
    pub amount: Decimal,
    pub main_account_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VirtualAccount {
    pub id: i64,
    pub name: String,
    pub limit: Decimal,
    pub total_spent: Decimal,
    pub monthly_reset: bool,
}

impl VirtualAccount {
    /// Can go negative: the limit is a soft threshold.
    pub fn remaining(&self) -> Decimal {
        self.limit - self.total_spent
    }

    /// Not capped: an envelope over its limit reports more than 100.
    pub fn usage_percent(&self) -> Decimal {
        percent_of(self.total_spent, self.limit)
    }

    pub fn is_over_limit(&self) -> bool {
        self.total_spent > self.limit
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewVirtualAccount {
    pub name: String,
    pub limit: Decimal,
    pub monthly_reset: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub name: String,
    pub note: Option<String>,
    pub amount: Decimal,
    pub virtual_account_id: i64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    pub name: String,
    pub note: Option<String>,
    pub amount: Decimal,
    pub virtual_account_id: i64,
    pub date: NaiveDate,
}

/// Frozen snapshot of a virtual account at period close.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub month: u32,
    pub year: i32,
    pub virtual_account_id: i64,
    pub limit: Decimal,
    pub name: String,
    pub total_spent: Decimal,
}

impl Report {
    pub fn snapshot(account: &VirtualAccount, period: Period) -> Self {
        Report {
            month: period.month,
            year: period.year,
            virtual_account_id: account.id,
            limit: account.limit,
            name: account.name.clone(),
            total_spent: account.total_spent,
        }
    }

    /// Share of the limit used in the closed month, capped at 100.
    pub fn usage_percent(&self) -> Decimal {
        percent_of(self.total_spent, self.limit).min(Decimal::ONE_HUNDRED)
    }

    pub fn period(&self) -> Period {
        Period {
            year: self.year,
            month: self.month,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalExpense {
    pub expense_id: i64,
    pub name: String,
    pub note: Option<String>,
    pub amount: Decimal,
    pub virtual_account_id: i64,
    pub month: u32,
    pub year: i32,
    pub date: NaiveDate,
}

impl HistoricalExpense {
    pub fn archive(expense: &Expense, period: Period) -> Self {
        HistoricalExpense {
            expense_id: expense.id,
            name: expense.name.clone(),
            note: expense.note.clone(),
            amount: expense.amount,
            virtual_account_id: expense.virtual_account_id,
            month: period.month,
            year: period.year,
            date: expense.date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn january_wraps_to_december_of_prior_year() {
        let jan = Period::new(1, 2025).unwrap();
        assert_eq!(jan.previous(), Period::new(12, 2024).unwrap());
        assert_eq!(Period::new(7, 2025).unwrap().previous().month, 6);
    }

    #[test]
    fn periods_order_by_year_then_month() {
        let dec_2024 = Period::new(12, 2024).unwrap();
        let jan_2025 = Period::new(1, 2025).unwrap();
        assert!(dec_2024 < jan_2025);
        assert!(Period::new(3, 2025).unwrap() > Period::new(2, 2025).unwrap());
    }

    #[test]
    fn month_out_of_range_is_rejected() {
        assert!(matches!(
            Period::new(13, 2025),
            Err(TrackerError::Validation(_))
        ));
        assert!(Period::new(0, 2025).is_err());
    }

    #[test]
    fn usage_and_remaining() {
        let acct = VirtualAccount {
            id: 1,
            name: "Fuel".into(),
            limit: dec("200"),
            total_spent: dec("250"),
            monthly_reset: true,
        };
        assert_eq!(acct.remaining(), dec("-50"));
        assert_eq!(acct.usage_percent(), dec("125"));
        assert!(acct.is_over_limit());

        let unlimited = VirtualAccount {
            limit: Decimal::ZERO,
            ..acct
        };
        assert_eq!(unlimited.usage_percent(), Decimal::ZERO);

        let extreme = VirtualAccount {
            limit: dec("0.0000000001"),
            total_spent: Decimal::MAX,
            ..unlimited
        };
        assert_eq!(extreme.usage_percent(), Decimal::MAX);
    }

    #[test]
    fn report_usage_is_capped_at_one_hundred() {
        let mut report = Report {
            month: 1,
            year: 2024,
            virtual_account_id: 1,
            limit: dec("300"),
            name: "Groceries".into(),
            total_spent: dec("170"),
        };
        assert_eq!(report.usage_percent().round_dp(2), dec("56.67"));

        report.total_spent = dec("450");
        assert_eq!(report.usage_percent(), dec("100"));

        report.limit = Decimal::ZERO;
        assert_eq!(report.usage_percent(), Decimal::ZERO);
    }
}
