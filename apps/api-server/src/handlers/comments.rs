//! Comment handlers.

use actix_web::{HttpResponse, web};

use blog_core::ValidationError;
use blog_core::domain::NewComment;
use blog_core::sanitize::sanitize;
use blog_shared::dto::CreateCommentRequest;

use crate::middleware::error::{ApiError, ApiResult};
use crate::state::AppState;

const AUTHOR_NAME_MAX: usize = 100;
const AUTHOR_EMAIL_MAX: usize = 200;
const CONTENT_MAX: usize = 2000;

/// GET /api/posts/{id}/comments
pub async fn list_comments(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let post_id = require_post(&state, path.into_inner()).await?;
    let comments = state.comments.list_for_post(post_id).await?;
    Ok(HttpResponse::Ok().json(comments))
}

/// POST /api/posts/{id}/comments - no auth, but sanitized like every other
/// free-text input.
pub async fn create_comment(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<CreateCommentRequest>,
) -> ApiResult<HttpResponse> {
    let post_id = require_post(&state, path.into_inner()).await?;
    let req = body.into_inner();

    let (author_name, content) = match (
        req.author_name.filter(|s| !s.trim().is_empty()),
        req.content.filter(|s| !s.trim().is_empty()),
    ) {
        (Some(name), Some(content)) => (name, content),
        _ => {
            return Err(ValidationError::MissingFields("author_name, content").into());
        }
    };

    let comment = state
        .comments
        .create(NewComment {
            post_id,
            author_name: sanitize(&author_name, AUTHOR_NAME_MAX),
            author_email: req
                .author_email
                .map(|e| sanitize(&e, AUTHOR_EMAIL_MAX))
                .filter(|e| !e.is_empty()),
            content: sanitize(&content, CONTENT_MAX),
        })
        .await?;

    Ok(HttpResponse::Created().json(comment))
}

/// 404 unless the post exists.
async fn require_post(state: &AppState, post_id: i32) -> Result<i32, ApiError> {
    state
        .posts
        .find_by_id(post_id)
        .await?
        .map(|p| p.id)
        .ok_or_else(|| ApiError::NotFound("Post not found".to_string()))
}
