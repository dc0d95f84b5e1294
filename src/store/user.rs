use serde::{Deserialize, Serialize};

/// A user account as it crosses the HTTP boundary.
///
/// Every field defaults when absent so partial payloads such as
/// `{"username":"root"}` still decode. An `id` of `0` is never assigned by a
/// store; inbound records usually carry it because clients leave it out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub admin: bool,
}

impl User {
    pub fn new(username: impl Into<String>, password: impl Into<String>, admin: bool) -> Self {
        Self {
            id: 0,
            username: username.into(),
            password: password.into(),
            admin,
        }
    }

    /// True when `other` presents the same username and password.
    pub fn credentials_match(&self, other: &User) -> bool {
        self.username == other.username && self.password == other.password
    }
}
