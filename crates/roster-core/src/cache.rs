//! Caching proxy over the user store

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use roster_db::{NewUser, StoreError, User, UserStore};
use tokio::sync::Mutex;
use tracing::debug;

/// Initial believed-size value, strictly less than any real store size so
/// the first `list_all` always reloads from the store.
const SIZE_SENTINEL: i64 = -100;

/// Snapshot of all known users plus the size the store is believed to have.
/// Equality of the two is the sole cache-validity check.
struct CacheState {
    snapshot: HashMap<i64, User>,
    believed_size: i64,
}

/// Whole-snapshot cache in front of a [`UserStore`].
///
/// Implements [`UserStore`] itself, so it wraps either the database
/// directly or another proxy (decorator composition). A successful
/// `create` only advances the believed-size counter; the snapshot is
/// rebuilt wholesale on the next reload rather than patched per entry.
pub struct CacheProxy {
    store: Arc<dyn UserStore>,
    state: Mutex<CacheState>,
}

impl CacheProxy {
    /// Wrap a store with a fresh (empty, forced-miss) cache.
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self {
            store,
            state: Mutex::new(CacheState {
                snapshot: HashMap::new(),
                believed_size: SIZE_SENTINEL,
            }),
        }
    }
}

#[async_trait]
impl UserStore for CacheProxy {
    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        // One lock for the whole operation; a failed delegate call leaves
        // counter and snapshot exactly as they were.
        let mut state = self.state.lock().await;
        let user = self.store.create(user).await?;

        // Counter-only advance: the new record stays out of the snapshot
        // until the next full reload (see the staleness test below).
        state.believed_size += 1;
        debug!(id = user.id, believed_size = state.believed_size, "user created, snapshot now stale");
        Ok(user)
    }

    async fn list_all(&self) -> Result<Vec<User>, StoreError> {
        let mut state = self.state.lock().await;

        if state.snapshot.len() as i64 == state.believed_size {
            debug!(entries = state.snapshot.len(), "cache hit, serving snapshot");
            let mut users: Vec<User> = state.snapshot.values().cloned().collect();
            users.sort_by_key(|u| u.id);
            return Ok(users);
        }

        debug!(
            entries = state.snapshot.len(),
            believed_size = state.believed_size,
            "cache miss, reloading from store"
        );

        // On reload failure the stale snapshot and counter survive, so a
        // transient outage does not discard previously cached data.
        let users = self.store.list_all().await?;

        state.believed_size = users.len() as i64;
        state.snapshot = users.iter().map(|u| (u.id, u.clone())).collect();
        Ok(users)
    }
}
