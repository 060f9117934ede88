//! API-key extractor for mutation handlers.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use std::future::{Ready, ready};

use crate::middleware::error::ApiError;
use crate::state::AppState;

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Guard extractor - include it in a handler's signature to require a valid
/// `X-API-Key`. A missing header answers 401, a wrong one 403.
///
/// ```ignore
/// async fn delete_post(_auth: RequireApiKey, ...) -> ApiResult<HttpResponse>
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RequireApiKey;

impl FromRequest for RequireApiKey {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<AppState>>() else {
            tracing::error!("AppState not found in app data");
            return ready(Err(ApiError::Internal(
                "Server configuration error".to_string(),
            )));
        };

        // A header that is present but not valid UTF-8 can never match the
        // secret, so it counts as a mismatch rather than a missing key.
        let presented = match req.headers().get(API_KEY_HEADER) {
            None => None,
            Some(value) => match value.to_str() {
                Ok(s) => Some(s),
                Err(_) => return ready(Err(ApiError::Forbidden)),
            },
        };

        ready(
            state
                .authenticator
                .authenticate(presented)
                .map(|()| RequireApiKey)
                .map_err(Into::into),
        )
    }
}
