//! SQLite-backed user repository

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use tracing::info;

use crate::error::StoreError;
use crate::models::{NewUser, User};
use crate::store::UserStore;

/// Database connection and operations
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database connection
    pub async fn new(database_url: &str) -> Result<Self, StoreError> {
        info!("Connecting to database: {}", database_url);

        let pool = SqlitePool::connect(database_url).await?;
        let db = Self { pool };
        db.run_migrations().await?;
        Ok(db)
    }

    /// Get the underlying pool for advanced usage
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run database migrations
    async fn run_migrations(&self) -> Result<(), StoreError> {
        info!("Running database migrations");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL,
                name TEXT NOT NULL,
                age INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_users_email ON users(email)
            "#,
        )
        .execute(&self.pool)
        .await?;

        info!("Database migrations completed");
        Ok(())
    }

    /// Insert a new user
    pub async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        // Check if the email is already taken
        let existing = self.get_user_by_email(&user.email).await?;
        if existing.is_some() {
            return Err(StoreError::Conflict(format!(
                "User with email '{}' already exists",
                user.email
            )));
        }

        let result = sqlx::query(
            r#"
            INSERT INTO users (email, password, name, age)
            VALUES (?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&user.email)
        .bind(&user.password)
        .bind(&user.name)
        .bind(user.age)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::map_unique_violation(e, &user.email))?;

        let id: i64 = result.get("id");

        Ok(user.into_user(id))
    }

    /// Get a user by email
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let result = sqlx::query(
            r#"
            SELECT id, email, password, name, age
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        result.map(|row| User::try_from(&row).map_err(StoreError::from)).transpose()
    }

    /// Get a user by ID
    pub async fn get_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let result = sqlx::query(
            r#"
            SELECT id, email, password, name, age
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        result.map(|row| User::try_from(&row).map_err(StoreError::from)).transpose()
    }

    /// List all users, oldest first
    pub async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, email, password, name, age
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| User::try_from(row).map_err(StoreError::from))
            .collect()
    }

    /// Count persisted users
    pub async fn count_users(&self) -> Result<i64, StoreError> {
        let result = sqlx::query("SELECT COUNT(*) as count FROM users")
            .fetch_one(&self.pool)
            .await?;
        let count: i64 = result.get("count");
        Ok(count)
    }

    /// The pre-insert existence check can race with a concurrent insert;
    /// the UNIQUE constraint still fires and must surface as a conflict.
    fn map_unique_violation(e: sqlx::Error, email: &str) -> StoreError {
        match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StoreError::Conflict(format!("User with email '{}' already exists", email))
            }
            _ => StoreError::Database(e),
        }
    }
}

#[async_trait]
impl UserStore for Database {
    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        self.insert_user(user).await
    }

    async fn list_all(&self) -> Result<Vec<User>, StoreError> {
        self.list_users().await
    }
}
