//! Route table for the versioned REST API.
//!
//! Literal segments such as `/posts/search` are registered ahead of the
//! `/{id}` routes they would otherwise be captured by.

use actix_web::web;

use super::validation::{json_config, path_config, query_config};
use super::{comments, posts, users};

/// Prefix shared by every resource route.
pub const API_PREFIX: &str = "/api/v1";

/// Register extractor configuration and every resource handler under
/// [`API_PREFIX`].
///
/// # Examples
/// ```
/// use actix_web::App;
/// use blog_backend::inbound::http::routes;
///
/// let _app = App::new().configure(routes::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .app_data(query_config())
        .service(
            web::scope(API_PREFIX)
                .service(users::list_users)
                .service(users::create_user)
                .service(users::get_user)
                .service(users::update_user)
                .service(users::delete_user)
                .service(posts::list_posts)
                .service(posts::create_post)
                .service(posts::search_posts)
                .service(posts::posts_by_author)
                .service(posts::get_post)
                .service(posts::update_post)
                .service(posts::delete_post)
                .service(comments::create_comment)
                .service(comments::comments_by_post)
                .service(comments::comments_by_author)
                .service(comments::get_comment)
                .service(comments::update_comment)
                .service(comments::delete_comment),
        );
}
