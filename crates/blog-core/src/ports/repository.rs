use async_trait::async_trait;

use crate::domain::{Category, Comment, NewComment, NewPost, Post, PostStatus};
use crate::error::RepoError;

/// Read-only slug lookup - the seam the request validator uses to enforce
/// slug uniqueness without depending on the full repository surface.
#[async_trait]
pub trait SlugLookup: Send + Sync {
    async fn slug_exists(&self, slug: &str) -> Result<bool, RepoError>;
}

/// Listing parameters, already range-checked by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostQuery {
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Restrict to one status; `None` lists all.
    pub status: Option<PostStatus>,
}

/// One page of posts plus the total match count.
#[derive(Debug, Clone)]
pub struct PostPage {
    pub posts: Vec<Post>,
    pub total: u64,
}

/// Post repository.
#[async_trait]
pub trait PostRepository: SlugLookup {
    /// List posts ordered by `published_at` then `created_at`, newest first.
    async fn list(&self, query: PostQuery) -> Result<PostPage, RepoError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError>;

    /// Insert a validated post; the store assigns id and timestamps.
    async fn create(&self, draft: NewPost) -> Result<Post, RepoError>;

    /// Persist an already-merged post (see [`Post::apply`]).
    ///
    /// [`Post::apply`]: crate::domain::Post::apply
    async fn update(&self, post: Post) -> Result<Post, RepoError>;

    /// Delete by id. Returns `false` when no such post existed.
    async fn delete(&self, id: i32) -> Result<bool, RepoError>;
}

/// Category repository.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories, ordered by name.
    async fn list(&self) -> Result<Vec<Category>, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Comments for one post, oldest first.
    async fn list_for_post(&self, post_id: i32) -> Result<Vec<Comment>, RepoError>;

    async fn create(&self, draft: NewComment) -> Result<Comment, RepoError>;
}
