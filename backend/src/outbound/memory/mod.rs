//! In-memory blog store used when no database is configured.
//!
//! One [`InMemoryBlogStore`] implements all three repository ports over a
//! single mutex-guarded state, which lets it mirror the database's rules:
//! identifiers come from per-table sequences, usernames and emails are
//! unique, and deleting a user or post cascades to everything that
//! references it.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    CommentRepository, CommentRepositoryError, PostRepository, PostRepositoryError,
    UniqueUserField, UserRepository, UserRepositoryError,
};
use crate::domain::{
    AuthorRef, Comment, CommentContent, CommentId, Email, NewComment, NewPost, NewUser, Post,
    PostContent, PostId, PostTitle, User, UserId, Username,
};

#[derive(Debug, Clone)]
struct PostRecord {
    title: PostTitle,
    content: PostContent,
    created_at: DateTime<Utc>,
    author_id: UserId,
}

#[derive(Debug, Clone)]
struct CommentRecord {
    content: CommentContent,
    created_at: DateTime<Utc>,
    author_id: UserId,
    post_id: PostId,
}

#[derive(Debug, Default)]
struct State {
    users: BTreeMap<i64, User>,
    posts: BTreeMap<i64, PostRecord>,
    comments: BTreeMap<i64, CommentRecord>,
    next_user_id: i64,
    next_post_id: i64,
    next_comment_id: i64,
}

fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

impl State {
    fn author(&self, id: UserId) -> Option<AuthorRef> {
        self.users.get(&id.as_i64()).map(|user| AuthorRef {
            id,
            username: user.username().clone(),
        })
    }

    fn taken_field(
        &self,
        username: &Username,
        email: &Email,
        except: Option<UserId>,
    ) -> Option<UniqueUserField> {
        let mut others = self
            .users
            .values()
            .filter(|user| Some(user.id()) != except);
        if others.clone().any(|user| user.email() == email) {
            return Some(UniqueUserField::Email);
        }
        others
            .any(|user| user.username() == username)
            .then_some(UniqueUserField::Username)
    }

    fn post(&self, id: i64) -> Option<Post> {
        let record = self.posts.get(&id)?;
        let author = self.author(record.author_id)?;
        Some(Post::new(
            PostId::new(id),
            record.title.clone(),
            record.content.clone(),
            record.created_at,
            author,
        ))
    }

    fn comment(&self, id: i64) -> Option<Comment> {
        let record = self.comments.get(&id)?;
        let author = self.author(record.author_id)?;
        Some(Comment::new(
            CommentId::new(id),
            record.content.clone(),
            record.created_at,
            author,
            record.post_id,
        ))
    }

    fn collect_posts(&self, filter: impl Fn(&PostRecord) -> bool) -> Vec<Post> {
        self.posts
            .iter()
            .filter(|(_, record)| filter(record))
            .filter_map(|(id, _)| self.post(*id))
            .collect()
    }

    fn remove_post(&mut self, id: i64) -> bool {
        let removed = self.posts.remove(&id).is_some();
        if removed {
            self.comments
                .retain(|_, comment| comment.post_id.as_i64() != id);
        }
        removed
    }

    fn remove_user(&mut self, id: UserId) -> bool {
        let removed = self.users.remove(&id.as_i64()).is_some();
        if removed {
            let owned: Vec<i64> = self
                .posts
                .iter()
                .filter(|(_, post)| post.author_id == id)
                .map(|(post_id, _)| *post_id)
                .collect();
            for post_id in owned {
                self.remove_post(post_id);
            }
            self.comments.retain(|_, comment| comment.author_id != id);
        }
        removed
    }
}

fn newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| {
        b.created_at()
            .cmp(&a.created_at())
            .then_with(|| b.id().cmp(&a.id()))
    });
}

/// Mutex-guarded blog state implementing every repository port.
#[derive(Debug, Default)]
pub struct InMemoryBlogStore {
    state: Mutex<State>,
}

impl InMemoryBlogStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, String> {
        self.state
            .lock()
            .map_err(|_| "in-memory store lock poisoned".to_owned())
    }
}

#[async_trait]
impl UserRepository for InMemoryBlogStore {
    async fn list_all(&self) -> Result<Vec<User>, UserRepositoryError> {
        let state = self.lock().map_err(UserRepositoryError::query)?;
        Ok(state.users.values().cloned().collect())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        let state = self.lock().map_err(UserRepositoryError::query)?;
        Ok(state.users.get(&id.as_i64()).cloned())
    }

    async fn exists_by_id(&self, id: UserId) -> Result<bool, UserRepositoryError> {
        let state = self.lock().map_err(UserRepositoryError::query)?;
        Ok(state.users.contains_key(&id.as_i64()))
    }

    async fn exists_by_email(&self, email: &Email) -> Result<bool, UserRepositoryError> {
        let state = self.lock().map_err(UserRepositoryError::query)?;
        Ok(state.users.values().any(|user| user.email() == email))
    }

    async fn exists_by_username(&self, username: &Username) -> Result<bool, UserRepositoryError> {
        let state = self.lock().map_err(UserRepositoryError::query)?;
        Ok(state.users.values().any(|user| user.username() == username))
    }

    async fn insert(&self, user: &NewUser) -> Result<User, UserRepositoryError> {
        let mut state = self.lock().map_err(UserRepositoryError::query)?;
        if let Some(field) = state.taken_field(&user.username, &user.email, None) {
            return Err(UserRepositoryError::duplicate(field));
        }
        let id = UserId::new(next_id(&mut state.next_user_id));
        let stored = User::new(
            id,
            user.username.clone(),
            user.email.clone(),
            user.password_digest.clone(),
        );
        state.users.insert(id.as_i64(), stored.clone());
        Ok(stored)
    }

    async fn update(&self, user: &User) -> Result<Option<User>, UserRepositoryError> {
        let mut state = self.lock().map_err(UserRepositoryError::query)?;
        if !state.users.contains_key(&user.id().as_i64()) {
            return Ok(None);
        }
        if let Some(field) = state.taken_field(user.username(), user.email(), Some(user.id())) {
            return Err(UserRepositoryError::duplicate(field));
        }
        let Some(existing) = state.users.get_mut(&user.id().as_i64()) else {
            return Ok(None);
        };
        let updated = existing
            .clone()
            .with_profile(user.username().clone(), user.email().clone());
        *existing = updated.clone();
        Ok(Some(updated))
    }

    async fn delete_by_id(&self, id: UserId) -> Result<bool, UserRepositoryError> {
        let mut state = self.lock().map_err(UserRepositoryError::query)?;
        Ok(state.remove_user(id))
    }
}

#[async_trait]
impl PostRepository for InMemoryBlogStore {
    async fn list_newest_first(&self) -> Result<Vec<Post>, PostRepositoryError> {
        let state = self.lock().map_err(PostRepositoryError::query)?;
        let mut posts = state.collect_posts(|_| true);
        newest_first(&mut posts);
        Ok(posts)
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostRepositoryError> {
        let state = self.lock().map_err(PostRepositoryError::query)?;
        Ok(state.post(id.as_i64()))
    }

    async fn find_by_author(&self, author_id: UserId) -> Result<Vec<Post>, PostRepositoryError> {
        let state = self.lock().map_err(PostRepositoryError::query)?;
        Ok(state.collect_posts(|post| post.author_id == author_id))
    }

    async fn search_by_title(&self, title_fragment: &str) -> Result<Vec<Post>, PostRepositoryError> {
        let state = self.lock().map_err(PostRepositoryError::query)?;
        let needle = title_fragment.to_lowercase();
        let mut posts = state.collect_posts(|post| {
            post.title.as_ref().to_lowercase().contains(&needle)
        });
        newest_first(&mut posts);
        Ok(posts)
    }

    async fn exists_by_id(&self, id: PostId) -> Result<bool, PostRepositoryError> {
        let state = self.lock().map_err(PostRepositoryError::query)?;
        Ok(state.posts.contains_key(&id.as_i64()))
    }

    async fn insert(&self, post: &NewPost) -> Result<Post, PostRepositoryError> {
        let mut state = self.lock().map_err(PostRepositoryError::query)?;
        if !state.users.contains_key(&post.author_id.as_i64()) {
            return Err(PostRepositoryError::missing_author(post.author_id));
        }
        let id = next_id(&mut state.next_post_id);
        state.posts.insert(
            id,
            PostRecord {
                title: post.title.clone(),
                content: post.content.clone(),
                created_at: post.created_at,
                author_id: post.author_id,
            },
        );
        state
            .post(id)
            .ok_or_else(|| PostRepositoryError::query("inserted post vanished"))
    }

    async fn update(&self, post: &Post) -> Result<Option<Post>, PostRepositoryError> {
        let mut state = self.lock().map_err(PostRepositoryError::query)?;
        let id = post.id().as_i64();
        let Some(record) = state.posts.get_mut(&id) else {
            return Ok(None);
        };
        record.title = post.title().clone();
        record.content = post.content().clone();
        Ok(state.post(id))
    }

    async fn delete_by_id(&self, id: PostId) -> Result<bool, PostRepositoryError> {
        let mut state = self.lock().map_err(PostRepositoryError::query)?;
        Ok(state.remove_post(id.as_i64()))
    }
}

#[async_trait]
impl CommentRepository for InMemoryBlogStore {
    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, CommentRepositoryError> {
        let state = self.lock().map_err(CommentRepositoryError::query)?;
        Ok(state.comment(id.as_i64()))
    }

    async fn list_by_post_oldest_first(
        &self,
        post_id: PostId,
    ) -> Result<Vec<Comment>, CommentRepositoryError> {
        let state = self.lock().map_err(CommentRepositoryError::query)?;
        let mut comments: Vec<Comment> = state
            .comments
            .iter()
            .filter(|(_, record)| record.post_id == post_id)
            .filter_map(|(id, _)| state.comment(*id))
            .collect();
        comments.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().cmp(&b.id()))
        });
        Ok(comments)
    }

    async fn list_by_author(
        &self,
        author_id: UserId,
    ) -> Result<Vec<Comment>, CommentRepositoryError> {
        let state = self.lock().map_err(CommentRepositoryError::query)?;
        Ok(state
            .comments
            .iter()
            .filter(|(_, record)| record.author_id == author_id)
            .filter_map(|(id, _)| state.comment(*id))
            .collect())
    }

    async fn exists_by_id(&self, id: CommentId) -> Result<bool, CommentRepositoryError> {
        let state = self.lock().map_err(CommentRepositoryError::query)?;
        Ok(state.comments.contains_key(&id.as_i64()))
    }

    async fn insert(&self, comment: &NewComment) -> Result<Comment, CommentRepositoryError> {
        let mut state = self.lock().map_err(CommentRepositoryError::query)?;
        if !state.users.contains_key(&comment.author_id.as_i64()) {
            return Err(CommentRepositoryError::missing_author(comment.author_id));
        }
        if !state.posts.contains_key(&comment.post_id.as_i64()) {
            return Err(CommentRepositoryError::missing_post(comment.post_id));
        }
        let id = next_id(&mut state.next_comment_id);
        state.comments.insert(
            id,
            CommentRecord {
                content: comment.content.clone(),
                created_at: comment.created_at,
                author_id: comment.author_id,
                post_id: comment.post_id,
            },
        );
        state
            .comment(id)
            .ok_or_else(|| CommentRepositoryError::query("inserted comment vanished"))
    }

    async fn update(&self, comment: &Comment) -> Result<Option<Comment>, CommentRepositoryError> {
        let mut state = self.lock().map_err(CommentRepositoryError::query)?;
        let id = comment.id().as_i64();
        let Some(record) = state.comments.get_mut(&id) else {
            return Ok(None);
        };
        record.content = comment.content().clone();
        Ok(state.comment(id))
    }

    async fn delete_by_id(&self, id: CommentId) -> Result<bool, CommentRepositoryError> {
        let mut state = self.lock().map_err(CommentRepositoryError::query)?;
        Ok(state.comments.remove(&id.as_i64()).is_some())
    }
}
