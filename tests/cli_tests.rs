// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{count, date, dec, envelope, spend, tracker_at};
use moneyjar::clock::FixedClock;
use moneyjar::commands::{accounts, balance, config, doctor, expenses, incomes, reports, rollover};
use moneyjar::models::Period;
use moneyjar::repo::{period, reports as report_rows, settings};
use moneyjar::{Tracker, cli, db};
use rust_decimal::Decimal;
use std::rc::Rc;
use tempfile::tempdir;

fn matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["moneyjar"];
    argv.extend_from_slice(args);
    cli::build_cli().get_matches_from(argv)
}

/// Returns the matches of the first-level subcommand, ready for its handler.
fn sub(args: &[&str]) -> clap::ArgMatches {
    let m = matches(args);
    m.subcommand().expect("subcommand").1.clone()
}

#[test]
fn account_add_then_limit_through_handlers() {
    let (tracker, _clock) = tracker_at(2024, 1, 10);
    accounts::handle(
        &tracker,
        &sub(&["account", "add", "--name", " Groceries ", "--limit", "300,50"]),
    )
    .unwrap();

    let listed = tracker.accounts.accounts();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Groceries");
    assert_eq!(listed[0].limit, dec("300.50"));
    assert!(listed[0].monthly_reset);

    let id = listed[0].id.to_string();
    accounts::handle(&tracker, &sub(&["account", "limit", "--id", &id, "--amount", "320"])).unwrap();
    assert_eq!(tracker.accounts.get(listed[0].id).unwrap().limit, dec("320"));

    accounts::handle(&tracker, &sub(&["account", "list", "--json"])).unwrap();
    accounts::handle(&tracker, &sub(&["account", "show", "--id", &id])).unwrap();
}

#[test]
fn account_with_zero_limit_is_refused() {
    let (tracker, _clock) = tracker_at(2024, 1, 10);
    let err = accounts::handle(
        &tracker,
        &sub(&["account", "add", "--name", "Travel", "--limit", "0", "--no-reset"]),
    )
    .unwrap_err();
    assert!(err.to_string().contains("Limit must be greater than 0"), "{err}");
    assert_eq!(count(&tracker, "virtual_accounts"), 0);
}

#[test]
fn expense_add_defaults_to_today_and_debits_balance() {
    let (tracker, _clock) = tracker_at(2024, 3, 14);
    balance::handle(&tracker, &sub(&["balance", "set", "--amount", "200"])).unwrap();
    let food = envelope(&tracker, "Food", "100", true);
    let id = food.id.to_string();

    expenses::handle(
        &tracker,
        &sub(&["expense", "add", "--account", &id, "--name", "Market", "--amount", "12,40"]),
    )
    .unwrap();

    let detail = tracker.detail.current().unwrap();
    assert_eq!(detail.expenses.len(), 1);
    assert_eq!(detail.expenses[0].date, date(2024, 3, 14));
    assert_eq!(detail.expenses[0].amount, dec("12.40"));
    assert_eq!(tracker.balance.balance(), dec("187.60"));

    let expense_id = detail.expenses[0].id.to_string();
    expenses::handle(&tracker, &sub(&["expense", "rm", "--id", &expense_id])).unwrap();
    assert_eq!(tracker.balance.balance(), dec("200"));
    assert_eq!(count(&tracker, "expenses"), 0);
}

#[test]
fn expense_with_bad_date_is_rejected() {
    let (tracker, _clock) = tracker_at(2024, 3, 14);
    let food = envelope(&tracker, "Food", "100", true);
    let id = food.id.to_string();
    let err = expenses::handle(
        &tracker,
        &sub(&[
            "expense", "add", "--account", &id, "--name", "Market", "--amount", "5", "--date",
            "14/03/2024",
        ]),
    )
    .unwrap_err();
    assert!(err.to_string().contains("Invalid date"), "{err}");
    assert_eq!(count(&tracker, "expenses"), 0);
}

#[test]
fn negative_balance_via_cli_is_stored_as_zero() {
    let (tracker, _clock) = tracker_at(2024, 1, 10);
    balance::handle(&tracker, &sub(&["balance", "set", "--amount", "-40"])).unwrap();
    assert_eq!(tracker.balance.balance(), Decimal::ZERO);
    balance::handle(&tracker, &sub(&["balance", "show"])).unwrap();
}

#[test]
fn income_add_and_remove_through_handlers() {
    let (tracker, _clock) = tracker_at(2024, 1, 10);
    incomes::handle(
        &tracker,
        &sub(&["income", "add", "--name", "Salary", "--amount", "1500", "--note", "January"]),
    )
    .unwrap();
    let items = tracker.incomings.items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].note.as_deref(), Some("January"));
    assert_eq!(tracker.balance.balance(), dec("1500"));

    incomes::handle(&tracker, &sub(&["income", "list", "--jsonl"])).unwrap();
    let id = items[0].id.to_string();
    incomes::handle(&tracker, &sub(&["income", "rm", "--id", &id])).unwrap();
    assert!(tracker.incomings.items().is_empty());
    assert_eq!(tracker.balance.balance(), Decimal::ZERO);
}

#[test]
fn rollover_and_report_commands() {
    let (tracker, clock) = tracker_at(2024, 1, 10);
    let food = envelope(&tracker, "Food", "300", true);
    spend(&tracker, food.id, "Market", "120", date(2024, 1, 15));

    clock.set(date(2024, 2, 2));
    rollover::handle(&tracker, &sub(&["rollover", "status"])).unwrap();
    rollover::handle(&tracker, &sub(&["rollover", "run"])).unwrap();
    assert_eq!(
        period::get(tracker.connection()).unwrap().to_string(),
        "2024-02"
    );
    // second run in the same month is a no-op
    rollover::handle(&tracker, &sub(&["rollover", "run"])).unwrap();
    assert_eq!(count(&tracker, "reports"), 1);

    let closed = report_rows::find(tracker.connection(), Period::new(1, 2024).unwrap(), food.id)
        .unwrap()
        .unwrap();
    assert_eq!(
        reports::report_header(&closed, "€"),
        "2024-01 Food: spent € 120.00 of € 300.00 (40%)"
    );
    assert!(
        report_rows::find(tracker.connection(), Period::new(12, 2023).unwrap(), food.id)
            .unwrap()
            .is_none()
    );

    let id = food.id.to_string();
    reports::handle(&tracker, &sub(&["report", "list", "--account", &id])).unwrap();
    reports::handle(
        &tracker,
        &sub(&["report", "history", "--account", &id, "--month", "2024-01"]),
    )
    .unwrap();
    reports::handle(
        &tracker,
        &sub(&["report", "history", "--account", &id, "--month", "2024-01", "--json"]),
    )
    .unwrap();
    let err = reports::handle(
        &tracker,
        &sub(&["report", "history", "--account", &id, "--month", "2024-13"]),
    )
    .unwrap_err();
    assert!(err.to_string().contains("Invalid month"), "{err}");
}

#[test]
fn currency_symbol_can_be_changed() {
    let (tracker, _clock) = tracker_at(2024, 1, 10);
    assert_eq!(
        settings::get_currency_symbol(tracker.connection()).unwrap(),
        settings::DEFAULT_CURRENCY_SYMBOL
    );
    config::handle(tracker.connection(), &sub(&["config", "currency", "--set", "CHF"])).unwrap();
    assert_eq!(
        settings::get_currency_symbol(tracker.connection()).unwrap(),
        "CHF"
    );
    assert!(settings::set_currency_symbol(tracker.connection(), "  ").is_err());
}

#[test]
fn doctor_flags_drift_and_pending_rollover() {
    let (tracker, _clock) = tracker_at(2024, 1, 10);
    let food = envelope(&tracker, "Food", "100", true);
    spend(&tracker, food.id, "Bread", "3", date(2024, 1, 10));
    assert!(doctor::find_issues(tracker.connection(), date(2024, 1, 20)).unwrap().is_empty());

    tracker
        .connection()
        .execute(
            "UPDATE virtual_accounts SET total_spent='10' WHERE id=?1",
            [food.id],
        )
        .unwrap();
    let issues = doctor::find_issues(tracker.connection(), date(2024, 2, 1)).unwrap();
    let kinds: Vec<&str> = issues.iter().map(|r| r[0].as_str()).collect();
    assert_eq!(kinds, vec!["total_spent_drift", "rollover_pending"]);
    doctor::handle(tracker.connection(), date(2024, 2, 1)).unwrap();
}

#[test]
fn global_db_flag_is_visible_from_the_top() {
    let m = matches(&["status", "--db", "/tmp/elsewhere.sqlite"]);
    assert_eq!(
        m.get_one::<String>("db").map(String::as_str),
        Some("/tmp/elsewhere.sqlite")
    );
    let path = db::db_path(Some(" /tmp/explicit.sqlite ")).unwrap();
    assert_eq!(path.to_str(), Some("/tmp/explicit.sqlite"));
}

#[test]
fn on_disk_store_survives_reopen_and_rolls_over() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("moneyjar.sqlite");

    let clock = Rc::new(FixedClock::ymd(2024, 1, 10));
    {
        let conn = db::open_or_init(&path, clock.as_ref()).unwrap();
        let tracker = Tracker::new(conn, clock.clone());
        tracker.startup().into_result().unwrap();
        tracker.balance.set_balance(dec("500")).unwrap();
        let food = envelope(&tracker, "Food", "200", true);
        spend(&tracker, food.id, "Market", "80", date(2024, 1, 11));
    }

    clock.set(date(2024, 2, 1));
    let conn = db::open_or_init(&path, clock.as_ref()).unwrap();
    let tracker = Tracker::new(conn, clock.clone());
    tracker.startup().into_result().unwrap();

    assert_eq!(tracker.balance.balance(), dec("420"));
    assert_eq!(count(&tracker, "reports"), 1);
    assert_eq!(count(&tracker, "expenses"), 0);
    assert_eq!(
        period::get(tracker.connection()).unwrap().to_string(),
        "2024-02"
    );
}
