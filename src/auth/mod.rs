// auth/mod.rs - body-carried authorization gate
//
// There are no tokens or sessions: each request carries its actor in the
// body and the store decides whether that actor may proceed.

use crate::error::{ApiError, ApiResult};
use crate::store::{User, UserStore};

/// Which store predicate an operation requires of its actor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// Credentials match an admin account
    IsAdmin,
    /// Credentials match any existing account
    IsValid,
}

impl Predicate {
    pub fn as_str(&self) -> &'static str {
        match self {
            Predicate::IsAdmin => "admin",
            Predicate::IsValid => "valid",
        }
    }
}

/// Ask the store whether `actor` satisfies `predicate`.
///
/// Fails closed: anything other than an explicit `true` from the store is
/// `Unauthorized`, and callers must `?` this before touching the store again.
pub async fn authorize(store: &dyn UserStore, actor: &User, predicate: Predicate) -> ApiResult<()> {
    let allowed = match predicate {
        Predicate::IsAdmin => store.is_admin(actor).await,
        Predicate::IsValid => store.is_valid(actor).await,
    };

    if allowed {
        return Ok(());
    }

    tracing::warn!(
        "Rejected request from '{}': failed the {} check",
        actor.username,
        predicate.as_str()
    );
    Err(ApiError::unauthorized(format!(
        "User '{}' does not pass the {} check",
        actor.username,
        predicate.as_str()
    )))
}
