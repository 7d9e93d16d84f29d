//! HTTP middleware for axum.
//!
//! - `auth` - Bearer token resolution and the principal extractor

pub mod auth;

pub use auth::{auth_middleware, AuthState, OptionalAuth};
