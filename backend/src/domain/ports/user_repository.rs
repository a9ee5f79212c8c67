//! Port abstraction for user persistence adapters and their errors.

use std::fmt;

use async_trait::async_trait;

use crate::domain::{Email, NewUser, User, UserId, Username};

use super::define_port_error;

/// User columns guarded by a uniqueness constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueUserField {
    Email,
    Username,
}

impl fmt::Display for UniqueUserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email => write!(f, "email"),
            Self::Username => write!(f, "username"),
        }
    }
}

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A write collided with the unique constraint on `field`.
        Duplicate { field: UniqueUserField } => "user {field} already exists",
    }
}

/// Driven port for user storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Return every user ordered by identifier.
    async fn list_all(&self) -> Result<Vec<User>, UserRepositoryError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Report whether a user with the identifier exists.
    async fn exists_by_id(&self, id: UserId) -> Result<bool, UserRepositoryError>;

    /// Report whether the email is already registered.
    async fn exists_by_email(&self, email: &Email) -> Result<bool, UserRepositoryError>;

    /// Report whether the username is already taken.
    async fn exists_by_username(&self, username: &Username)
    -> Result<bool, UserRepositoryError>;

    /// Persist a new user and return it with its assigned identifier.
    async fn insert(&self, user: &NewUser) -> Result<User, UserRepositoryError>;

    /// Overwrite the username and email of an existing user.
    ///
    /// Returns `None` when no row matched the identifier.
    async fn update(&self, user: &User) -> Result<Option<User>, UserRepositoryError>;

    /// Delete a user, cascading to their posts and comments.
    ///
    /// Returns `false` when no row matched the identifier.
    async fn delete_by_id(&self, id: UserId) -> Result<bool, UserRepositoryError>;
}
