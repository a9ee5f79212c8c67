//! Domain ports for the hexagonal boundary.
//!
//! Driving ports (`*Query`, `*Command`) are called by inbound adapters and
//! implemented by the domain services. Driven ports (`*Repository`,
//! [`PasswordHasher`]) are called by the services and implemented by
//! outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod comment_repository;
mod comments_command;
mod comments_query;
mod password_hasher;
mod post_repository;
mod posts_command;
mod posts_query;
mod user_repository;
mod users_command;
mod users_query;

#[cfg(test)]
pub use comment_repository::MockCommentRepository;
pub use comment_repository::{CommentRepository, CommentRepositoryError};
#[cfg(test)]
pub use comments_command::MockCommentsCommand;
pub use comments_command::{CommentsCommand, CreateCommentRequest, UpdateCommentRequest};
#[cfg(test)]
pub use comments_query::MockCommentsQuery;
pub use comments_query::{CommentPayload, CommentsQuery};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use post_repository::MockPostRepository;
pub use post_repository::{PostRepository, PostRepositoryError};
#[cfg(test)]
pub use posts_command::MockPostsCommand;
pub use posts_command::{CreatePostRequest, PostsCommand, UpdatePostRequest};
#[cfg(test)]
pub use posts_query::MockPostsQuery;
pub use posts_query::{PostPayload, PostsQuery};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UniqueUserField, UserRepository, UserRepositoryError};
#[cfg(test)]
pub use users_command::MockUsersCommand;
pub use users_command::{CreateUserRequest, UpdateUserRequest, UsersCommand};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::{UserPayload, UsersQuery};

#[cfg(test)]
mod tests;
