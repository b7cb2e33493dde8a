//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    /// Business-rule rejection, raised before any store interaction.
    #[error("{0}")]
    Validation(String),

    /// Store failure, passed through unchanged (conflicts stay
    /// distinguishable via `StoreError::Conflict`).
    #[error("Store error: {0}")]
    Store(#[from] roster_db::StoreError),
}

impl CoreError {
    /// Whether this error is a duplicate-email conflict from the store.
    pub fn is_conflict(&self) -> bool {
        matches!(self, CoreError::Store(e) if e.is_conflict())
    }
}
