//! Roster Database Layer
//!
//! This crate provides the persistence layer for Roster,
//! using SQLite via sqlx for durable user storage.

pub mod error;
pub mod models;
pub mod repository;
pub mod store;

pub use error::StoreError;
pub use models::{NewUser, User};
pub use repository::Database;
pub use store::UserStore;

/// Re-export sqlx types for convenience
pub use sqlx;
pub use sqlx::SqlitePool;
