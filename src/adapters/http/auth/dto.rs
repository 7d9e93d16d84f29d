//! HTTP DTOs for authentication endpoints.

use serde::{Deserialize, Serialize};

use crate::adapters::http::users::UserResponse;
use crate::application::handlers::{
    AuthPayload, ChangePasswordCommand, LoginCommand, RegisterCommand,
};
use crate::domain::foundation::Role;

/// Either identifier may be given; email wins when both are.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl From<LoginRequest> for LoginCommand {
    fn from(req: LoginRequest) -> Self {
        LoginCommand {
            username: req.username,
            email: req.email,
            password: req.password,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub scopes: Option<Vec<String>>,
}

impl From<RegisterRequest> for RegisterCommand {
    fn from(req: RegisterRequest) -> Self {
        RegisterCommand {
            username: req.username,
            email: req.email,
            password: req.password,
            role: req.role,
            scopes: req.scopes,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

impl From<ChangePasswordRequest> for ChangePasswordCommand {
    fn from(req: ChangePasswordRequest) -> Self {
        ChangePasswordCommand {
            current_password: req.current_password,
            new_password: req.new_password,
        }
    }
}

/// Token plus the account it was issued for.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub expires_at: String,
    pub user: UserResponse,
}

impl From<AuthPayload> for AuthResponse {
    fn from(payload: AuthPayload) -> Self {
        Self {
            token: payload.token,
            expires_at: payload.expires_at.to_iso_string(),
            user: payload.user.into(),
        }
    }
}
