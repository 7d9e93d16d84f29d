//! Axum router for account endpoints.

use axum::routing::{get, patch};
use axum::Router;

use super::handlers::{delete_user, list_users, me, update_user};
use crate::adapters::http::state::AppState;

/// Account routes, mounted under `/api`.
///
/// # Routes
/// - `GET /me` - Caller's own profile
/// - `GET /users` - Every account (admin)
/// - `PATCH /users/:id` - Partial update (admin)
/// - `DELETE /users/:id` - Remove another account (admin)
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(me))
        .route("/users", get(list_users))
        .route("/users/:id", patch(update_user).delete(delete_user))
}
