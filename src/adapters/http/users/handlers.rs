//! HTTP handlers for account endpoints.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::OptionalAuth;
use crate::adapters::http::state::AppState;
use crate::domain::foundation::UserId;

use super::dto::{UpdateUserRequest, UserResponse};

fn parse_user_id(path: Result<Path<String>, PathRejection>) -> Result<UserId, ApiError> {
    let Path(raw) = path?;
    Ok(raw.parse()?)
}

/// GET /api/me
///
/// `null` when the account was removed after the token was issued.
pub async fn me(
    State(state): State<AppState>,
    auth: OptionalAuth,
) -> Result<Json<Option<UserResponse>>, ApiError> {
    let profile = state.get_me_handler().handle(auth.principal()).await?;
    Ok(Json(profile.map(UserResponse::from)))
}

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: OptionalAuth,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.list_users_handler().handle(auth.principal()).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// PATCH /api/users/:id
pub async fn update_user(
    State(state): State<AppState>,
    auth: OptionalAuth,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, ApiError> {
    let id = parse_user_id(path)?;
    let Json(request) = body?;
    let profile = state
        .update_user_handler()
        .handle(auth.principal(), request.into_command(id))
        .await?;
    Ok(Json(profile.into()))
}

/// DELETE /api/users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    auth: OptionalAuth,
    path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = parse_user_id(path)?;
    state
        .delete_user_handler()
        .handle(auth.principal(), id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
