//! Database models

use serde::{Deserialize, Serialize};
use sqlx::Row;

/// User model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    /// Opaque credential, stored as-is (never serialized)
    #[serde(skip_serializing)]
    pub password: String,
    pub name: String,
    pub age: i64,
}

/// New user (for insertion)
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub name: String,
    pub age: i64,
}

impl NewUser {
    /// Attach the store-assigned identifier.
    pub fn into_user(self, id: i64) -> User {
        User {
            id,
            email: self.email,
            password: self.password,
            name: self.name,
            age: self.age,
        }
    }
}

impl TryFrom<&sqlx::sqlite::SqliteRow> for User {
    type Error = sqlx::Error;

    fn try_from(row: &sqlx::sqlite::SqliteRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            password: row.try_get("password")?,
            name: row.try_get("name")?,
            age: row.try_get("age")?,
        })
    }
}
