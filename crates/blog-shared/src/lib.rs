//! # Blog Shared
//!
//! Wire types shared between the server and API clients: request bodies,
//! response wrappers and the error body shape.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
