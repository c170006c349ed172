// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod accounts;
pub mod balance;
pub mod config;
pub mod doctor;
pub mod expenses;
pub mod incomes;
pub mod reports;
pub mod rollover;
