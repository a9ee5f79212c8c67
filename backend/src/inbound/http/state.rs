//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CommentsCommand, CommentsQuery, PostsCommand, PostsQuery, UsersCommand, UsersQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UsersQuery>,
    pub users_command: Arc<dyn UsersCommand>,
    pub posts: Arc<dyn PostsQuery>,
    pub posts_command: Arc<dyn PostsCommand>,
    pub comments: Arc<dyn CommentsQuery>,
    pub comments_command: Arc<dyn CommentsCommand>,
}

impl HttpState {
    /// Build state from services that implement both halves of each port pair.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use blog_backend::domain::{CommentService, PostService, UserService};
    /// use blog_backend::inbound::http::state::HttpState;
    /// use blog_backend::outbound::memory::InMemoryBlogStore;
    /// use blog_backend::outbound::security::Argon2PasswordHasher;
    /// use mockable::DefaultClock;
    ///
    /// let store = Arc::new(InMemoryBlogStore::new());
    /// let clock = Arc::new(DefaultClock);
    /// let state = HttpState::from_services(
    ///     Arc::new(UserService::new(store.clone(), Arc::new(Argon2PasswordHasher))),
    ///     Arc::new(PostService::new(store.clone(), store.clone(), clock.clone())),
    ///     Arc::new(CommentService::new(store.clone(), store.clone(), store, clock)),
    /// );
    /// let _users = state.users.clone();
    /// ```
    pub fn from_services<U, P, C>(users: Arc<U>, posts: Arc<P>, comments: Arc<C>) -> Self
    where
        U: UsersQuery + UsersCommand + 'static,
        P: PostsQuery + PostsCommand + 'static,
        C: CommentsQuery + CommentsCommand + 'static,
    {
        Self {
            users: users.clone(),
            users_command: users,
            posts: posts.clone(),
            posts_command: posts,
            comments: comments.clone(),
            comments_command: comments,
        }
    }
}
