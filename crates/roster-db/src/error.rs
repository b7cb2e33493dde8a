//! Store error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Duplicate entry: {0}")]
    Conflict(String),

    #[error("Migration error: {0}")]
    Migration(String),
}

impl StoreError {
    /// Whether this error is a duplicate-email conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict(_))
    }
}
