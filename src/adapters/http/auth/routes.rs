//! Axum router for authentication endpoints.

use axum::routing::post;
use axum::Router;

use super::handlers::{change_password, login, register};
use crate::adapters::http::state::AppState;

/// Authentication routes, mounted under `/api/auth`.
///
/// # Routes
/// - `POST /login` - Exchange identifier and password for a token
/// - `POST /register` - Create an account (admin)
/// - `POST /change-password` - Rotate the caller's own password
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/change-password", post(change_password))
}
