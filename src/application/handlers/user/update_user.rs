//! UpdateUserHandler - admin-only partial update of an account.
//!
//! Coupled rules:
//! - promoting to `ADMIN` clears scopes, even scopes supplied in the same call
//! - for employees, supplied scopes are stored verbatim
//! - a supplied credential goes through `prepare_credential`, so resubmitting
//!   an existing hash does not hash it again

use std::sync::Arc;

use tracing::info;

use crate::application::credentials::prepare_credential;
use crate::application::OperationError;
use crate::domain::foundation::{authorize, Action, Principal, Role, UserId};
use crate::domain::user::{UserPatch, UserProfile};
use crate::ports::{CredentialHasher, UserRepository};

/// Command to update a user; `None` fields are left unchanged.
#[derive(Debug, Clone)]
pub struct UpdateUserCommand {
    pub id: UserId,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
    pub scopes: Option<Vec<String>>,
}

impl UpdateUserCommand {
    /// A command that changes nothing on `id`.
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            username: None,
            email: None,
            password: None,
            role: None,
            scopes: None,
        }
    }
}

pub struct UpdateUserHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn CredentialHasher>,
}

impl UpdateUserHandler {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { users, hasher }
    }

    pub async fn handle(
        &self,
        principal: Option<&Principal>,
        cmd: UpdateUserCommand,
    ) -> Result<UserProfile, OperationError> {
        let actor = authorize(principal, &Action::UpdateUser)?;

        let current = self
            .users
            .find_by_id(&cmd.id)
            .await?
            .ok_or_else(|| OperationError::user_not_found(&cmd.id))?;

        let mut patch = UserPatch {
            username: cmd.username,
            email: cmd.email,
            credential_hash: None,
            role: cmd.role,
            scopes: cmd.scopes,
        }
        .normalized(current.role)?;

        if patch.username.is_some() || patch.email.is_some() {
            if let Some(field) = self
                .users
                .find_identity_conflict(
                    patch.username.as_deref(),
                    patch.email.as_deref(),
                    Some(&cmd.id),
                )
                .await?
            {
                return Err(OperationError::Conflict(field));
            }
        }

        if let Some(raw) = cmd.password.as_deref() {
            patch.credential_hash = Some(prepare_credential(self.hasher.as_ref(), raw).await?);
        }

        if patch.is_empty() {
            return Ok(current.profile());
        }

        let updated = self.users.update(&cmd.id, &patch).await?;
        info!(user_id = %updated.id, updated_by = %actor.id, "User updated");
        Ok(updated.profile())
    }
}
