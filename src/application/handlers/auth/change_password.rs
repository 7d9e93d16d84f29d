//! ChangePasswordHandler - lets any signed-in user replace their own secret.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::credentials::validate_new_secret;
use crate::application::OperationError;
use crate::domain::foundation::{authorize, Action, Principal};
use crate::domain::user::UserPatch;
use crate::ports::{CredentialHasher, UserRepository};

/// Command to change the caller's own password.
#[derive(Debug, Clone)]
pub struct ChangePasswordCommand {
    pub current_password: String,
    pub new_password: String,
}

/// Handler for password changes.
pub struct ChangePasswordHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn CredentialHasher>,
}

impl ChangePasswordHandler {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { users, hasher }
    }

    pub async fn handle(
        &self,
        principal: Option<&Principal>,
        cmd: ChangePasswordCommand,
    ) -> Result<(), OperationError> {
        let actor = authorize(principal, &Action::ChangeOwnPassword)?;

        let user = self
            .users
            .find_by_id(&actor.id)
            .await?
            .ok_or_else(|| OperationError::user_not_found(&actor.id))?;

        let current_ok = match user.credential_hash.as_deref() {
            Some(stored) => self.hasher.verify(&cmd.current_password, stored).await,
            None => false,
        };
        if !current_ok {
            warn!(user_id = %user.id, "Password change rejected: current password mismatch");
            return Err(OperationError::CurrentCredentialMismatch);
        }

        let new_secret = validate_new_secret(&cmd.new_password)?;

        // Always hash here: this path never receives a stored hash.
        let hash = self.hasher.hash(new_secret).await?;
        let patch = UserPatch {
            credential_hash: Some(hash),
            ..Default::default()
        };
        self.users.update(&user.id, &patch).await?;

        info!(user_id = %user.id, "Password changed");
        Ok(())
    }
}
