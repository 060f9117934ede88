//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

use blog_core::domain::{Category, Comment, NewComment, NewPost, Post};
use blog_core::error::RepoError;
use blog_core::ports::{
    CategoryRepository, CommentRepository, PostPage, PostQuery, PostRepository, SlugLookup,
};

use super::entity::{category, comment, post};

fn query_err(err: sea_orm::DbErr) -> RepoError {
    RepoError::Query(err.to_string())
}

/// Map unique-index violations to a constraint error; everything else stays
/// a query error.
fn insert_err(err: sea_orm::DbErr) -> RepoError {
    let msg = err.to_string();
    if msg.contains("duplicate") || msg.contains("unique") {
        RepoError::Constraint("Slug already exists".to_string())
    } else {
        RepoError::Query(msg)
    }
}

/// PostgreSQL post repository.
pub struct PostgresPosts {
    db: DbConn,
}

impl PostgresPosts {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SlugLookup for PostgresPosts {
    async fn slug_exists(&self, slug: &str) -> Result<bool, RepoError> {
        let count = post::Entity::find()
            .filter(post::Column::Slug.eq(slug))
            .count(&self.db)
            .await
            .map_err(query_err)?;
        Ok(count > 0)
    }
}

#[async_trait]
impl PostRepository for PostgresPosts {
    async fn list(&self, query: PostQuery) -> Result<PostPage, RepoError> {
        let mut select = post::Entity::find();
        if let Some(status) = query.status {
            select = select.filter(post::Column::Status.eq(status.as_str()));
        }

        let paginator = select
            .order_by_desc(post::Column::PublishedAt)
            .order_by_desc(post::Column::CreatedAt)
            .paginate(&self.db, u64::from(query.limit));

        let total = paginator.num_items().await.map_err(query_err)?;
        let models = paginator
            .fetch_page(u64::from(query.page - 1))
            .await
            .map_err(query_err)?;

        Ok(PostPage {
            posts: models.into_iter().map(Into::into).collect(),
            total,
        })
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        let model = post::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?;
        Ok(model.map(Into::into))
    }

    async fn create(&self, draft: NewPost) -> Result<Post, RepoError> {
        let now = Utc::now();
        let model = post::ActiveModel {
            title: Set(draft.title),
            content: Set(draft.content),
            author: Set(draft.author),
            slug: Set(draft.slug),
            status: Set(draft.status.as_str().to_string()),
            excerpt: Set(draft.excerpt),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            published_at: Set(draft.status.is_published().then(|| now.into())),
            ..Default::default()
        };

        let inserted = model.insert(&self.db).await.map_err(insert_err)?;
        Ok(inserted.into())
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let model: post::ActiveModel = post.into();
        let updated = model.update(&self.db).await.map_err(query_err)?;
        Ok(updated.into())
    }

    async fn delete(&self, id: i32) -> Result<bool, RepoError> {
        let result = post::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_err)?;
        Ok(result.rows_affected > 0)
    }
}

/// PostgreSQL category repository.
pub struct PostgresCategories {
    db: DbConn,
}

impl PostgresCategories {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategories {
    async fn list(&self) -> Result<Vec<Category>, RepoError> {
        let models = category::Entity::find()
            .order_by_asc(category::Column::Name)
            .all(&self.db)
            .await
            .map_err(query_err)?;
        Ok(models.into_iter().map(Into::into).collect())
    }
}

/// PostgreSQL comment repository.
pub struct PostgresComments {
    db: DbConn,
}

impl PostgresComments {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommentRepository for PostgresComments {
    async fn list_for_post(&self, post_id: i32) -> Result<Vec<Comment>, RepoError> {
        let models = comment::Entity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_err)?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn create(&self, draft: NewComment) -> Result<Comment, RepoError> {
        let model = comment::ActiveModel {
            post_id: Set(draft.post_id),
            author_name: Set(draft.author_name),
            author_email: Set(draft.author_email),
            content: Set(draft.content),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        let inserted = model.insert(&self.db).await.map_err(insert_err)?;
        Ok(inserted.into())
    }
}
