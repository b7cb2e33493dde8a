//! Roster Core Business Logic
//!
//! This crate provides the core functionality for Roster: the caching
//! proxy in front of the user store and the registration service that
//! enforces the business rules.

pub mod cache;
pub mod error;
pub mod service;

#[cfg(test)]
pub(crate) mod testing;

pub use cache::CacheProxy;
pub use error::CoreError;
pub use service::RegistrationService;
