//! Builders wiring repository adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use blog_backend::domain::ports::{CommentRepository, PostRepository, UserRepository};
use blog_backend::domain::{CommentService, PostService, UserService};
use blog_backend::inbound::http::state::HttpState;
use blog_backend::outbound::memory::InMemoryBlogStore;
use blog_backend::outbound::persistence::{
    DieselCommentRepository, DieselPostRepository, DieselUserRepository,
};
use blog_backend::outbound::security::Argon2PasswordHasher;

use super::ServerConfig;

/// Build services over the given repositories and bundle them for handlers.
fn build_services<U, P, C>(users: Arc<U>, posts: Arc<P>, comments: Arc<C>) -> HttpState
where
    U: UserRepository + 'static,
    P: PostRepository + 'static,
    C: CommentRepository + 'static,
{
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    HttpState::from_services(
        Arc::new(UserService::new(
            users.clone(),
            Arc::new(Argon2PasswordHasher),
        )),
        Arc::new(PostService::new(posts.clone(), users.clone(), clock.clone())),
        Arc::new(CommentService::new(comments, posts, users, clock)),
    )
}

/// Build HTTP state backed by PostgreSQL when a pool is configured, otherwise
/// by a process-local in-memory store.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => build_services(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselPostRepository::new(pool.clone())),
            Arc::new(DieselCommentRepository::new(pool.clone())),
        ),
        None => {
            let store = Arc::new(InMemoryBlogStore::new());
            build_services(store.clone(), store.clone(), store)
        }
    };
    web::Data::new(state)
}
