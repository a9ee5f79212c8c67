//! User domain service.
//!
//! Implements the user driving ports on top of the user repository and the
//! password hasher. Email and username uniqueness are checked before insert
//! (email first); the storage constraint remains authoritative and its
//! violations surface as the same `Conflict` errors.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    CreateUserRequest, PasswordHasher, UniqueUserField, UpdateUserRequest, UserPayload,
    UserRepository, UserRepositoryError, UsersCommand, UsersQuery,
};
use crate::domain::{Error, NewUser, UserId};

pub(crate) const USER_NOT_FOUND: &str = "User not found";

/// User service implementing [`UsersQuery`] and [`UsersCommand`].
#[derive(Clone)]
pub struct UserService<R, H> {
    users: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> UserService<R, H> {
    /// Create a new service with the given repository and hasher.
    pub fn new(users: Arc<R>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

fn duplicate_error(field: UniqueUserField) -> Error {
    let message = match field {
        UniqueUserField::Email => "Email already exists",
        UniqueUserField::Username => "Username already exists",
    };
    Error::conflict(message).with_details(json!({
        "field": field.to_string(),
        "code": "duplicate",
    }))
}

/// Map user repository failures onto domain errors.
pub(crate) fn map_user_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::Duplicate { field } => duplicate_error(field),
    }
}

#[async_trait]
impl<R, H> UsersQuery for UserService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn list_users(&self) -> Result<Vec<UserPayload>, Error> {
        let users = self
            .users
            .list_all()
            .await
            .map_err(map_user_repository_error)?;
        Ok(users.into_iter().map(UserPayload::from).collect())
    }

    async fn get_user(&self, id: UserId) -> Result<UserPayload, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_repository_error)?
            .map(UserPayload::from)
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))
    }
}

#[async_trait]
impl<R, H> UsersCommand for UserService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn create_user(&self, request: CreateUserRequest) -> Result<UserPayload, Error> {
        let CreateUserRequest {
            username,
            email,
            password,
        } = request;

        if self
            .users
            .exists_by_email(&email)
            .await
            .map_err(map_user_repository_error)?
        {
            debug!("registration rejected: email taken");
            return Err(duplicate_error(UniqueUserField::Email));
        }
        if self
            .users
            .exists_by_username(&username)
            .await
            .map_err(map_user_repository_error)?
        {
            debug!("registration rejected: username taken");
            return Err(duplicate_error(UniqueUserField::Username));
        }

        let password_digest = self
            .hasher
            .hash(&password)
            .map_err(|err| Error::internal(format!("password hashing failed: {err}")))?;

        let user = self
            .users
            .insert(&NewUser {
                username,
                email,
                password_digest,
            })
            .await
            .map_err(map_user_repository_error)?;

        info!(user_id = %user.id(), "user created");
        Ok(UserPayload::from(user))
    }

    async fn update_user(&self, request: UpdateUserRequest) -> Result<UserPayload, Error> {
        let UpdateUserRequest {
            id,
            username,
            email,
        } = request;

        let existing = self
            .users
            .find_by_id(id)
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))?;

        let updated = self
            .users
            .update(&existing.with_profile(username, email))
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))?;

        info!(user_id = %id, "user updated");
        Ok(UserPayload::from(updated))
    }

    async fn delete_user(&self, id: UserId) -> Result<(), Error> {
        let exists = self
            .users
            .exists_by_id(id)
            .await
            .map_err(map_user_repository_error)?;
        if !exists {
            debug!(user_id = %id, "delete rejected: user not found");
            return Err(Error::not_found(USER_NOT_FOUND));
        }

        let deleted = self
            .users
            .delete_by_id(id)
            .await
            .map_err(map_user_repository_error)?;
        if !deleted {
            return Err(Error::not_found(USER_NOT_FOUND));
        }

        info!(user_id = %id, "user deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
