//! In-memory store double for proxy and service tests

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};

use async_trait::async_trait;
use roster_db::{NewUser, StoreError, User, UserStore};

/// In-memory [`UserStore`] with call counting and failure injection.
#[derive(Default)]
pub struct MockStore {
    users: Mutex<Vec<User>>,
    next_id: AtomicI64,
    fail_create: AtomicBool,
    fail_list: AtomicBool,
    create_calls: AtomicUsize,
    list_calls: AtomicUsize,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            ..Self::default()
        }
    }

    pub fn seeded(users: &[(&str, i64)]) -> Self {
        let store = Self::new();
        {
            let mut guard = store.users.lock().unwrap();
            for (email, age) in users {
                let id = store.next_id.fetch_add(1, Ordering::SeqCst);
                guard.push(User {
                    id,
                    email: email.to_string(),
                    password: "secret".to_string(),
                    name: format!("user-{id}"),
                    age: *age,
                });
            }
        }
        store
    }

    pub fn set_fail_create(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_list(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::SeqCst);
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserStore for MockStore {
    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_create.load(Ordering::SeqCst) {
            return Err(StoreError::Database(roster_db::sqlx::Error::PoolClosed));
        }

        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict(format!(
                "User with email '{}' already exists",
                user.email
            )));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let user = user.into_user(id);
        users.push(user.clone());
        Ok(user)
    }

    async fn list_all(&self) -> Result<Vec<User>, StoreError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_list.load(Ordering::SeqCst) {
            return Err(StoreError::Database(roster_db::sqlx::Error::PoolClosed));
        }

        Ok(self.users.lock().unwrap().clone())
    }
}

pub fn new_user(email: &str, age: i64) -> NewUser {
    NewUser {
        email: email.to_string(),
        password: "secret".to_string(),
        name: "Test User".to_string(),
        age,
    }
}
