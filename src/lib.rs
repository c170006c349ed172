// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod clock;
pub mod commands;
pub mod db;
pub mod error;
pub mod models;
pub mod repo;
pub mod rollover;
pub mod state;
pub mod utils;

pub use error::{Result, TrackerError};
pub use state::Tracker;
