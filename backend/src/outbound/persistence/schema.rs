//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// Registered users.
    ///
    /// `username` and `email` carry the `users_username_key` and
    /// `users_email_key` unique constraints.
    users (id) {
        id -> Int8,
        username -> Varchar,
        email -> Varchar,
        /// Argon2 PHC string; never the plaintext password.
        password_hash -> Text,
    }
}

diesel::table! {
    /// Blog posts. Rows are removed with their author.
    posts (id) {
        id -> Int8,
        title -> Varchar,
        content -> Text,
        created_at -> Timestamptz,
        author_id -> Int8,
    }
}

diesel::table! {
    /// Comments on posts. Rows are removed with their author or post.
    comments (id) {
        id -> Int8,
        content -> Text,
        created_at -> Timestamptz,
        author_id -> Int8,
        post_id -> Int8,
    }
}

diesel::joinable!(posts -> users (author_id));
diesel::joinable!(comments -> posts (post_id));
diesel::joinable!(comments -> users (author_id));

diesel::allow_tables_to_appear_in_same_query!(users, posts, comments);
