//! HTTP handlers and route configuration.

mod categories;
mod comments;
mod health;
mod posts;

use actix_web::web;

use crate::middleware::error::ApiError;

/// Configure all application routes and the deserializer error mapping.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|_err, _req| {
        ApiError::BadRequest {
            error: "Invalid request format".to_string(),
            details: Some("Please check your JSON syntax".to_string()),
        }
        .into()
    }))
    .app_data(web::PathConfig::default().error_handler(|_err, _req| {
        ApiError::BadRequest {
            error: "Invalid post ID".to_string(),
            details: None,
        }
        .into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|_err, _req| {
        ApiError::BadRequest {
            error: "Invalid query parameters".to_string(),
            details: None,
        }
        .into()
    }))
    .service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .route("/posts", web::get().to(posts::list_posts))
            .route("/posts", web::post().to(posts::create_post))
            .route("/posts/{id}", web::get().to(posts::get_post))
            .route("/posts/{id}", web::put().to(posts::update_post))
            .route("/posts/{id}", web::delete().to(posts::delete_post))
            .route("/posts/{id}/comments", web::get().to(comments::list_comments))
            .route("/posts/{id}/comments", web::post().to(comments::create_comment))
            .route("/categories", web::get().to(categories::list_categories)),
    );
}
