//! Category handlers.

use actix_web::{HttpResponse, web};

use crate::middleware::error::ApiResult;
use crate::state::AppState;

/// GET /api/categories
pub async fn list_categories(state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    let categories = state.categories.list().await?;
    Ok(HttpResponse::Ok().json(categories))
}
