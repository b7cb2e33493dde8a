//! Registration service enforcing the business rules

use std::sync::Arc;

use roster_db::{NewUser, User, UserStore};
use tracing::{debug, info};

use crate::error::CoreError;

/// Minimum age accepted for registration. Fixed by policy, not configurable.
const MINIMUM_AGE: i64 = 18;

/// Service layer over a [`UserStore`] (the database or a caching proxy).
///
/// Stateless: the only logic is the age gate in front of `create`.
pub struct RegistrationService {
    store: Arc<dyn UserStore>,
}

impl RegistrationService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Register a new user.
    ///
    /// Rejects with [`CoreError::Validation`] before any store interaction
    /// when the age rule fails; otherwise delegates and returns the store's
    /// result or error unchanged.
    pub async fn register(&self, user: NewUser) -> Result<User, CoreError> {
        if user.age < MINIMUM_AGE {
            debug!(email = %user.email, age = user.age, "registration rejected by age rule");
            return Err(CoreError::Validation(
                "age under 18, registration prohibited".to_string(),
            ));
        }

        let user = self.store.create(user).await?;
        info!(id = user.id, email = %user.email, "user registered");
        Ok(user)
    }

    /// List all registered users.
    pub async fn list_users(&self) -> Result<Vec<User>, CoreError> {
        Ok(self.store.list_all().await?)
    }
}
