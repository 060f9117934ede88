//! API-key authentication.

use thiserror::Error;

/// Authentication failures. Missing and mismatched credentials are
/// distinct so the boundary can answer 401 vs 403.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("API key required")]
    Missing,

    #[error("Invalid API key")]
    Mismatch,
}

/// Compares a presented `X-API-Key` value against the configured secret.
///
/// The secret is injected at construction; the comparator never reads the
/// environment. Comparison is plain string equality - it is not
/// constant-time. The key is a coarse shared write gate behind a rate
/// limiter, not a per-user credential, and the timing side channel is
/// accepted rather than papered over with a constant-time compare.
#[derive(Debug, Clone)]
pub struct ApiKeyAuthenticator {
    secret: String,
}

impl ApiKeyAuthenticator {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn authenticate(&self, presented: Option<&str>) -> Result<(), AuthError> {
        match presented {
            None => Err(AuthError::Missing),
            Some(key) if key == self.secret => Ok(()),
            Some(_) => Err(AuthError::Mismatch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_distinguished_from_mismatch() {
        let auth = ApiKeyAuthenticator::new("s3cret");
        assert_eq!(auth.authenticate(None), Err(AuthError::Missing));
        assert_eq!(auth.authenticate(Some("wrong")), Err(AuthError::Mismatch));
        assert_eq!(auth.authenticate(Some("")), Err(AuthError::Mismatch));
        assert_eq!(auth.authenticate(Some("s3cret")), Ok(()));
    }
}
