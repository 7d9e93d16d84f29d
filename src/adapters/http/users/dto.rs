//! HTTP DTOs for account endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::UpdateUserCommand;
use crate::domain::foundation::{Role, UserId};
use crate::domain::user::UserProfile;

/// Account as returned to callers. Never carries the credential.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub scopes: Vec<String>,
}

impl From<UserProfile> for UserResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id.to_string(),
            username: profile.username,
            email: profile.email,
            role: profile.role,
            scopes: profile.scopes,
        }
    }
}

/// Partial account update. Absent fields stay unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub scopes: Option<Vec<String>>,
}

impl UpdateUserRequest {
    pub fn into_command(self, id: UserId) -> UpdateUserCommand {
        UpdateUserCommand {
            id,
            username: self.username,
            email: self.email,
            password: self.password,
            role: self.role,
            scopes: self.scopes,
        }
    }
}
