//! HTTP handlers for authentication endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::OptionalAuth;
use crate::adapters::http::state::AppState;

use super::dto::{AuthResponse, ChangePasswordRequest, LoginRequest, RegisterRequest};

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, ApiError> {
    let Json(request) = body?;
    let payload = state.login_handler().handle(request.into()).await?;
    Ok(Json(payload.into()))
}

/// POST /api/auth/register (admin)
pub async fn register(
    State(state): State<AppState>,
    auth: OptionalAuth,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let Json(request) = body?;
    let payload = state
        .register_handler()
        .handle(auth.principal(), request.into())
        .await?;
    Ok((StatusCode::CREATED, Json(payload.into())))
}

/// POST /api/auth/change-password
pub async fn change_password(
    State(state): State<AppState>,
    auth: OptionalAuth,
    body: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(request) = body?;
    state
        .change_password_handler()
        .handle(auth.principal(), request.into())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
