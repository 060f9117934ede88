//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`:
//! the in-memory fixed-window rate limiter and the repositories.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL repositories via SeaORM; without it
//!   only the in-memory repositories are built.

pub mod database;
pub mod rate_limit;

pub use database::{InMemoryCategories, InMemoryComments, InMemoryPosts};
pub use rate_limit::{FixedWindowLimiter, RateLimitConfig};

#[cfg(feature = "postgres")]
pub use database::{
    DatabaseConfig, PostgresCategories, PostgresComments, PostgresPosts, connect,
};
