// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Error hierarchy shared by the repositories, the rollover engine and the
//! state services.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    /// User input failed a precondition. Nothing was persisted.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    /// The underlying SQLite call failed. Multi-statement units are rolled back.
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// An internal invariant did not hold; the enclosing transaction is aborted.
    #[error("Consistency guard: {0}")]
    ConsistencyGuard(String),

    #[error("Rollover already in progress")]
    RolloverInFlight,
}

impl TrackerError {
    pub fn validation(msg: impl Into<String>) -> Self {
        TrackerError::Validation(msg.into())
    }

    pub fn not_found(entity: &'static str, id: i64) -> Self {
        TrackerError::NotFound { entity, id }
    }

    /// Guard failures propagate the same way storage failures do.
    pub fn is_storage_like(&self) -> bool {
        matches!(
            self,
            TrackerError::Storage(_) | TrackerError::ConsistencyGuard(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
