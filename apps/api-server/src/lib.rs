//! # Blog API Server
//!
//! Actix-web HTTP surface over the blog core: routing, CORS, rate limiting,
//! API-key auth and error mapping. Exposed as a library so integration
//! tests can assemble the same app the binary runs.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod state;

pub use config::AppConfig;
pub use state::AppState;
