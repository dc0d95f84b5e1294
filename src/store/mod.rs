// store/mod.rs - user store contract
//
// Persistence, lookup and the admin/validity predicates live behind
// UserStore. Handlers only ever talk to the trait object held in AppState.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

pub mod memory;
pub mod user;

pub use memory::MemoryStore;
pub use user::User;

/// Errors from a UserStore
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Username already taken: {0}")]
    DuplicateUsername(String),

    #[error("Username must not be empty")]
    EmptyUsername,

    #[error("No such user: {0}")]
    NotFound(String),

    #[error("Id {0} is reserved and cannot be stored")]
    ReservedId(i64),
}

/// Storage collaborator consumed by the HTTP layer.
///
/// Implementations own atomicity: a lookup followed by a write issued by two
/// concurrent requests may interleave, and this layer adds no locking of its
/// own around the calls.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new record and return it with its assigned id.
    async fn insert(&self, user: &User) -> Result<User, StoreError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;

    /// Replace the record whose id matches `user.id`.
    async fn update(&self, user: &User) -> Result<(), StoreError>;

    async fn list_all(&self) -> Result<Vec<User>, StoreError>;

    async fn list_logged_in(&self) -> Result<Vec<User>, StoreError>;

    async fn set_logged_in(&self, username: &str, logged_in: bool) -> Result<(), StoreError>;

    /// When `username` last logged in, if ever.
    async fn last_login(&self, username: &str) -> Result<Option<DateTime<Utc>>, StoreError>;

    /// Whether `actor` may run admin operations.
    async fn is_admin(&self, actor: &User) -> bool;

    /// Whether `actor` names an existing account with matching credentials.
    async fn is_valid(&self, actor: &User) -> bool;
}
