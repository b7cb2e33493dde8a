//! Store contract shared by the database and any decorating proxy

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{NewUser, User};

/// Contract for anything that can persist and list users.
///
/// Both the SQLite-backed [`Database`](crate::Database) and a caching proxy
/// implement this, so layers compose transparently: a service can wrap the
/// database directly or wrap a proxy that wraps the database.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a new user and return the record with its assigned id.
    ///
    /// Fails with [`StoreError::Conflict`] if the email already exists.
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;

    /// Return every persisted user, in stable (insertion) order.
    async fn list_all(&self) -> Result<Vec<User>, StoreError>;
}
