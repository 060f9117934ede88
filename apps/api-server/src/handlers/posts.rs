//! Post CRUD handlers.

use actix_web::{HttpResponse, web};
use chrono::Utc;
use serde::Deserialize;

use blog_core::validate::{CreatePayload, UpdatePayload};
use blog_shared::dto::{
    CreatePostRequest, DeletedResponse, Pagination, PostListResponse, UpdatePostRequest,
};

use crate::middleware::auth::RequireApiKey;
use crate::middleware::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<String>,
}

/// GET /api/posts
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> ApiResult<HttpResponse> {
    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(10);

    let post_query = state
        .validator
        .validate_list(page, limit, query.status.as_deref())?;
    let result = state.posts.list(post_query).await?;

    Ok(HttpResponse::Ok().json(PostListResponse {
        posts: result.posts,
        pagination: Pagination::new(page, limit, result.total),
    }))
}

/// GET /api/posts/{id}
pub async fn get_post(state: web::Data<AppState>, path: web::Path<i32>) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Post not found".to_string()))?;

    Ok(HttpResponse::Ok().json(post))
}

/// POST /api/posts - requires a valid API key.
pub async fn create_post(
    _auth: RequireApiKey,
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> ApiResult<HttpResponse> {
    let req = body.into_inner();
    let payload = CreatePayload {
        title: req.title,
        content: req.content,
        author: req.author,
        slug: req.slug,
        status: req.status,
        excerpt: req.excerpt,
    };

    let draft = state
        .validator
        .validate_create(payload, state.posts.as_ref())
        .await?;
    let post = state.posts.create(draft).await?;

    tracing::info!(id = post.id, slug = %post.slug, "Post created");

    Ok(HttpResponse::Created().json(post))
}

/// PUT /api/posts/{id} - partial update, requires a valid API key.
pub async fn update_post(
    _auth: RequireApiKey,
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<UpdatePostRequest>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();

    // A missing post wins over an invalid body, as in the original API.
    let mut post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Post not found".to_string()))?;

    let req = body.into_inner();
    let patch = state.validator.validate_update(UpdatePayload {
        title: req.title,
        content: req.content,
        status: req.status,
        excerpt: req.excerpt,
    })?;

    post.apply(patch, Utc::now());
    let post = state.posts.update(post).await?;

    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /api/posts/{id} - requires a valid API key.
pub async fn delete_post(
    _auth: RequireApiKey,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();

    if !state.posts.delete(id).await? {
        return Err(ApiError::NotFound("Post not found".to_string()));
    }

    tracing::info!(id, "Post deleted");

    Ok(HttpResponse::Ok().json(DeletedResponse {
        message: "Post deleted successfully".to_string(),
        id,
    }))
}
