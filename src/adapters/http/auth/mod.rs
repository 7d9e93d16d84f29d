//! HTTP adapter for authentication endpoints.

pub mod dto;
mod handlers;
mod routes;

pub use dto::{AuthResponse, ChangePasswordRequest, LoginRequest, RegisterRequest};
pub use routes::auth_routes;
