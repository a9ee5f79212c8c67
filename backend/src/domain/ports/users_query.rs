//! Driving port for user reads and the user transfer shape.
//!
//! Inbound adapters use this port to fetch user-visible data without
//! importing persistence concerns.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, User, UserId};

/// Boundary-facing user representation. The password digest is never exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl From<User> for UserPayload {
    fn from(value: User) -> Self {
        Self {
            id: value.id().as_i64(),
            username: value.username().as_ref().to_owned(),
            email: value.email().as_ref().to_owned(),
        }
    }
}

/// Use-case port for reading users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Return every user.
    async fn list_users(&self) -> Result<Vec<UserPayload>, Error>;

    /// Return one user or `NotFound`.
    async fn get_user(&self, id: UserId) -> Result<UserPayload, Error>;
}
