use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::{StoreError, User, UserStore};

#[derive(Debug, Clone)]
struct StoredUser {
    user: User,
    logged_in: bool,
    last_login: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
struct Inner {
    users: HashMap<i64, StoredUser>,
    next_id: i64,
}

impl Inner {
    fn id_for(&self, username: &str) -> Option<i64> {
        self.users
            .values()
            .find(|stored| stored.user.username == username)
            .map(|stored| stored.user.id)
    }

    fn sorted(&self, filter: impl Fn(&StoredUser) -> bool) -> Vec<User> {
        let mut users: Vec<User> = self
            .users
            .values()
            .filter(|stored| filter(stored))
            .map(|stored| stored.user.clone())
            .collect();
        users.sort_by_key(|user| user.id);
        users
    }
}

/// In-process UserStore backed by a HashMap under a tokio RwLock.
///
/// Every operation takes the lock once, so each call is atomic on its own.
/// Ids start at 1 and are never reused.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `users`. Records that the store
    /// refuses (duplicates, empty usernames) are skipped.
    pub async fn seeded(users: &[User]) -> Self {
        let store = Self::new();
        for user in users {
            match store.insert(user).await {
                Ok(created) => info!("Seeded user '{}' with id {}", created.username, created.id),
                Err(e) => warn!("Skipping seed user '{}': {}", user.username, e),
            }
        }
        store
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert(&self, user: &User) -> Result<User, StoreError> {
        if user.username.is_empty() {
            return Err(StoreError::EmptyUsername);
        }

        let mut inner = self.inner.write().await;
        if inner.id_for(&user.username).is_some() {
            return Err(StoreError::DuplicateUsername(user.username.clone()));
        }

        inner.next_id += 1;
        let created = User {
            id: inner.next_id,
            ..user.clone()
        };
        inner.users.insert(
            created.id,
            StoredUser {
                user: created.clone(),
                logged_in: false,
                last_login: None,
            },
        );

        debug!("Inserted user {:?}", created);
        Ok(created)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .id_for(username)
            .and_then(|id| inner.users.get(&id))
            .map(|stored| stored.user.clone()))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(&id).map(|stored| stored.user.clone()))
    }

    async fn update(&self, user: &User) -> Result<(), StoreError> {
        if user.id == 0 {
            return Err(StoreError::ReservedId(user.id));
        }
        if user.username.is_empty() {
            return Err(StoreError::EmptyUsername);
        }

        let mut inner = self.inner.write().await;
        if let Some(owner) = inner.id_for(&user.username) {
            if owner != user.id {
                return Err(StoreError::DuplicateUsername(user.username.clone()));
            }
        }

        let stored = inner
            .users
            .get_mut(&user.id)
            .ok_or_else(|| StoreError::NotFound(format!("id {}", user.id)))?;
        stored.user = user.clone();

        debug!("Updated user {:?}", user);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.inner.read().await.sorted(|_| true))
    }

    async fn list_logged_in(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.inner.read().await.sorted(|stored| stored.logged_in))
    }

    async fn set_logged_in(&self, username: &str, logged_in: bool) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let id = inner
            .id_for(username)
            .ok_or_else(|| StoreError::NotFound(username.to_string()))?;

        if let Some(stored) = inner.users.get_mut(&id) {
            stored.logged_in = logged_in;
            if logged_in {
                stored.last_login = Some(Utc::now());
            }
        }
        Ok(())
    }

    async fn last_login(&self, username: &str) -> Result<Option<DateTime<Utc>>, StoreError> {
        let inner = self.inner.read().await;
        let id = inner
            .id_for(username)
            .ok_or_else(|| StoreError::NotFound(username.to_string()))?;
        Ok(inner.users.get(&id).and_then(|stored| stored.last_login))
    }

    async fn is_admin(&self, actor: &User) -> bool {
        if !actor.admin {
            return false;
        }
        let inner = self.inner.read().await;
        inner
            .id_for(&actor.username)
            .and_then(|id| inner.users.get(&id))
            .map(|stored| stored.user.admin && stored.user.credentials_match(actor))
            .unwrap_or(false)
    }

    async fn is_valid(&self, actor: &User) -> bool {
        let inner = self.inner.read().await;
        inner
            .id_for(&actor.username)
            .and_then(|id| inner.users.get(&id))
            .map(|stored| stored.user.credentials_match(actor))
            .unwrap_or(false)
    }
}
