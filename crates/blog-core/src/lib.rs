//! # Blog Core
//!
//! The domain layer of the blog API.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! slug normalization, input sanitization, API-key authentication, and the
//! request validator that gates every mutation before it reaches persistence.

pub mod auth;
pub mod domain;
pub mod error;
pub mod ports;
pub mod sanitize;
pub mod slug;
pub mod validate;

pub use error::{RepoError, ValidationError};
