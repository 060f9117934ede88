//! Domain-level error types.

use thiserror::Error;

/// Validation failures - one specific rule per rejection.
///
/// The request validator short-circuits on the first failing rule, so a
/// caller always sees exactly one of these per request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required fields: {0}")]
    MissingFields(&'static str),

    #[error("Invalid slug format")]
    InvalidSlug,

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Slug already exists")]
    DuplicateSlug,

    #[error("At least one field is required for update")]
    EmptyUpdate,

    #[error("Invalid page number (1-1000)")]
    InvalidPage,

    #[error("Invalid limit (1-100)")]
    InvalidLimit,
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
