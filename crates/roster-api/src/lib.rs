//! Roster REST API
//!
//! This crate provides the Axum-based HTTP surface for Roster: user
//! registration, user listing, and health checks.

pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
