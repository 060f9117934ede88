//! Error handling - maps the domain taxonomy onto the wire error shape.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use std::fmt;
use std::time::Duration;

use blog_core::ValidationError;
use blog_core::auth::AuthError;
use blog_core::error::RepoError;
use blog_core::validate::ValidateError;
use blog_shared::ErrorResponse;

/// Application-level error type that converts to `{error, details?}` bodies.
#[derive(Debug)]
pub enum ApiError {
    /// Rejected by a validation rule.
    Validation(ValidationError),
    /// Malformed request (bad JSON, bad path id, bad query string).
    BadRequest {
        error: String,
        details: Option<String>,
    },
    NotFound(String),
    /// No credential presented.
    Unauthorized,
    /// Wrong credential presented.
    Forbidden,
    RateLimited {
        retry_after: Duration,
    },
    /// Unexpected failure; only an opaque message and a correlation token
    /// cross the boundary, the detail goes to the server log.
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(err) => write!(f, "Validation failed: {err}"),
            ApiError::BadRequest { error, .. } => write!(f, "Bad request: {error}"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ApiError::Unauthorized => write!(f, "API key required"),
            ApiError::Forbidden => write!(f, "Invalid API key"),
            ApiError::RateLimited { retry_after } => {
                write!(f, "Rate limit exceeded, retry in {}s", retry_after.as_secs())
            }
            ApiError::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Validation(err) => {
                HttpResponse::BadRequest().json(ErrorResponse::new(err.to_string()))
            }
            ApiError::BadRequest { error, details } => {
                let mut body = ErrorResponse::new(error.clone());
                if let Some(details) = details {
                    body = body.with_details(details.clone());
                }
                HttpResponse::BadRequest().json(body)
            }
            ApiError::NotFound(msg) => HttpResponse::NotFound().json(ErrorResponse::new(msg.clone())),
            ApiError::Unauthorized => HttpResponse::Unauthorized().json(
                ErrorResponse::new("API key required")
                    .with_details("Please provide X-API-Key header for write operations"),
            ),
            ApiError::Forbidden => {
                HttpResponse::Forbidden().json(ErrorResponse::new("Invalid API key"))
            }
            ApiError::RateLimited { retry_after } => HttpResponse::TooManyRequests()
                .insert_header(("X-RateLimit-Remaining", "0"))
                .insert_header(("Retry-After", retry_after.as_secs().to_string()))
                .json(
                    ErrorResponse::new("Rate limit exceeded").with_details(format!(
                        "Try again in {} seconds",
                        retry_after.as_secs()
                    )),
                ),
            ApiError::Internal(msg) => {
                let request_id = uuid::Uuid::new_v4().to_string();
                tracing::error!(request_id = %request_id, "Internal error: {msg}");
                HttpResponse::InternalServerError().json(
                    ErrorResponse::new("Internal server error").with_request_id(request_id),
                )
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Missing => ApiError::Unauthorized,
            AuthError::Mismatch => ApiError::Forbidden,
        }
    }
}

impl From<RepoError> for ApiError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => ApiError::NotFound("Resource not found".to_string()),
            RepoError::Constraint(msg) => ApiError::BadRequest {
                error: msg,
                details: None,
            },
            RepoError::Connection(msg) | RepoError::Query(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<ValidateError> for ApiError {
    fn from(err: ValidateError) -> Self {
        match err {
            ValidateError::Invalid(e) => e.into(),
            ValidateError::Store(e) => e.into(),
        }
    }
}

/// Result type alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    // The middleware renders its 429 through this variant, so the full wire
    // shape is pinned here.
    #[test]
    fn rate_limited_renders_429_with_headers() {
        let response = ApiError::RateLimited {
            retry_after: Duration::from_secs(30),
        }
        .error_response();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            response.headers().get("Retry-After").unwrap(),
            "30"
        );
        assert_eq!(
            response.headers().get("X-RateLimit-Remaining").unwrap(),
            "0"
        );
    }

    #[test]
    fn auth_errors_split_401_from_403() {
        assert_eq!(
            ApiError::from(AuthError::Missing).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(AuthError::Mismatch).status_code(),
            StatusCode::FORBIDDEN
        );
    }
}
