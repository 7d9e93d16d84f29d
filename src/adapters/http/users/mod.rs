//! HTTP adapter for account endpoints.

pub mod dto;
mod handlers;
mod routes;

pub use dto::{UpdateUserRequest, UserResponse};
pub use routes::user_routes;
