//! Driving port for user mutations.

use async_trait::async_trait;

use crate::domain::{Email, Error, Password, UserId, Username};

use super::UserPayload;

/// Validated registration input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    pub username: Username,
    pub email: Email,
    pub password: Password,
}

/// Validated profile update. The password is not part of an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateUserRequest {
    pub id: UserId,
    pub username: Username,
    pub email: Email,
}

/// Use-case port for creating, updating, and deleting users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Register a user; `Conflict` when the email or username is taken.
    async fn create_user(&self, request: CreateUserRequest) -> Result<UserPayload, Error>;

    /// Overwrite username and email; `NotFound` when the id is unknown.
    async fn update_user(&self, request: UpdateUserRequest) -> Result<UserPayload, Error>;

    /// Remove a user and everything they authored; `NotFound` when absent.
    async fn delete_user(&self, id: UserId) -> Result<(), Error>;
}
