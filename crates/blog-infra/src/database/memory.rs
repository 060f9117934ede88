//! In-memory repositories - used as fallback when no database is configured
//! and as the backing store for tests. Data is lost on process restart.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use blog_core::domain::{Category, Comment, NewComment, NewPost, Post};
use blog_core::error::RepoError;
use blog_core::ports::{
    CategoryRepository, CommentRepository, PostPage, PostQuery, PostRepository, SlugLookup,
};

/// In-memory post repository.
pub struct InMemoryPosts {
    posts: RwLock<HashMap<i32, Post>>,
    next_id: AtomicI32,
}

impl InMemoryPosts {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(HashMap::new()),
            next_id: AtomicI32::new(1),
        }
    }
}

impl Default for InMemoryPosts {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SlugLookup for InMemoryPosts {
    async fn slug_exists(&self, slug: &str) -> Result<bool, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.values().any(|p| p.slug == slug))
    }
}

#[async_trait]
impl PostRepository for InMemoryPosts {
    async fn list(&self, query: PostQuery) -> Result<PostPage, RepoError> {
        let posts = self.posts.read().await;
        let mut matched: Vec<Post> = posts
            .values()
            .filter(|p| query.status.is_none_or(|s| p.status == s))
            .cloned()
            .collect();

        matched.sort_by(|a, b| {
            b.published_at
                .cmp(&a.published_at)
                .then(b.created_at.cmp(&a.created_at))
        });

        let total = matched.len() as u64;
        let offset = (query.page as usize - 1) * query.limit as usize;
        let page: Vec<Post> = matched
            .into_iter()
            .skip(offset)
            .take(query.limit as usize)
            .collect();

        Ok(PostPage { posts: page, total })
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.get(&id).cloned())
    }

    async fn create(&self, draft: NewPost) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;

        // Mirror the store's unique index on slug.
        if posts.values().any(|p| p.slug == draft.slug) {
            return Err(RepoError::Constraint("Slug already exists".to_string()));
        }

        let now = Utc::now();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let post = Post {
            id,
            title: draft.title,
            content: draft.content,
            author: draft.author,
            slug: draft.slug,
            status: draft.status,
            excerpt: draft.excerpt,
            created_at: now,
            updated_at: now,
            published_at: draft.status.is_published().then_some(now),
        };
        posts.insert(id, post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        if !posts.contains_key(&post.id) {
            return Err(RepoError::NotFound);
        }
        posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: i32) -> Result<bool, RepoError> {
        let mut posts = self.posts.write().await;
        Ok(posts.remove(&id).is_some())
    }
}

/// In-memory category repository, seeded at construction.
pub struct InMemoryCategories {
    categories: Vec<Category>,
}

impl InMemoryCategories {
    pub fn new(mut categories: Vec<Category>) -> Self {
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Self { categories }
    }
}

impl Default for InMemoryCategories {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategories {
    async fn list(&self) -> Result<Vec<Category>, RepoError> {
        Ok(self.categories.clone())
    }
}

/// In-memory comment repository.
pub struct InMemoryComments {
    comments: RwLock<HashMap<i32, Comment>>,
    next_id: AtomicI32,
}

impl InMemoryComments {
    pub fn new() -> Self {
        Self {
            comments: RwLock::new(HashMap::new()),
            next_id: AtomicI32::new(1),
        }
    }
}

impl Default for InMemoryComments {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommentRepository for InMemoryComments {
    async fn list_for_post(&self, post_id: i32) -> Result<Vec<Comment>, RepoError> {
        let comments = self.comments.read().await;
        let mut matched: Vec<Comment> = comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(matched)
    }

    async fn create(&self, draft: NewComment) -> Result<Comment, RepoError> {
        let mut comments = self.comments.write().await;
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let comment = Comment {
            id,
            post_id: draft.post_id,
            author_name: draft.author_name,
            author_email: draft.author_email,
            content: draft.content,
            created_at: Utc::now(),
        };
        comments.insert(id, comment.clone());
        Ok(comment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_core::domain::{PostPatch, PostStatus};

    fn draft(title: &str, slug: &str) -> NewPost {
        NewPost {
            title: title.to_string(),
            content: "content".to_string(),
            author: "author".to_string(),
            slug: slug.to_string(),
            status: PostStatus::Draft,
            excerpt: None,
        }
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids() {
        let repo = InMemoryPosts::new();
        let a = repo.create(draft("A", "a")).await.unwrap();
        let b = repo.create(draft("B", "b")).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(a.published_at, None);
    }

    #[tokio::test]
    async fn create_enforces_slug_uniqueness() {
        let repo = InMemoryPosts::new();
        repo.create(draft("A", "same")).await.unwrap();
        let err = repo.create(draft("B", "same")).await.unwrap_err();
        assert!(matches!(err, RepoError::Constraint(_)));
        assert!(repo.slug_exists("same").await.unwrap());
        assert!(!repo.slug_exists("other").await.unwrap());
    }

    #[tokio::test]
    async fn published_draft_gets_published_at() {
        let repo = InMemoryPosts::new();
        let mut d = draft("A", "a");
        d.status = PostStatus::Published;
        let post = repo.create(d).await.unwrap();
        assert!(post.published_at.is_some());
    }

    #[tokio::test]
    async fn list_filters_and_paginates() {
        let repo = InMemoryPosts::new();
        for i in 0..5 {
            let mut d = draft(&format!("P{i}"), &format!("p{i}"));
            if i % 2 == 0 {
                d.status = PostStatus::Published;
            }
            repo.create(d).await.unwrap();
        }

        let page = repo
            .list(PostQuery {
                page: 1,
                limit: 2,
                status: Some(PostStatus::Published),
            })
            .await
            .unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.posts.len(), 2);

        let page2 = repo
            .list(PostQuery {
                page: 2,
                limit: 2,
                status: Some(PostStatus::Published),
            })
            .await
            .unwrap();
        assert_eq!(page2.posts.len(), 1);

        let all = repo
            .list(PostQuery {
                page: 1,
                limit: 100,
                status: None,
            })
            .await
            .unwrap();
        assert_eq!(all.total, 5);
    }

    #[tokio::test]
    async fn update_and_delete_round_trip() {
        let repo = InMemoryPosts::new();
        let mut post = repo.create(draft("A", "a")).await.unwrap();
        post.apply(
            PostPatch {
                title: Some("Renamed".to_string()),
                ..Default::default()
            },
            Utc::now(),
        );
        let updated = repo.update(post).await.unwrap();
        assert_eq!(updated.title, "Renamed");

        assert!(repo.delete(updated.id).await.unwrap());
        assert!(!repo.delete(updated.id).await.unwrap());
        assert!(repo.find_by_id(updated.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn comments_are_scoped_to_their_post() {
        let repo = InMemoryComments::new();
        for post_id in [1, 1, 2] {
            repo.create(NewComment {
                post_id,
                author_name: "reader".to_string(),
                author_email: None,
                content: "hi".to_string(),
            })
            .await
            .unwrap();
        }

        assert_eq!(repo.list_for_post(1).await.unwrap().len(), 2);
        assert_eq!(repo.list_for_post(2).await.unwrap().len(), 1);
        assert_eq!(repo.list_for_post(3).await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn categories_come_back_sorted() {
        let repo = InMemoryCategories::new(vec![
            Category {
                id: 1,
                name: "Zebra".to_string(),
                slug: "zebra".to_string(),
            },
            Category {
                id: 2,
                name: "Apple".to_string(),
                slug: "apple".to_string(),
            },
        ]);
        let names: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Apple", "Zebra"]);
    }
}
