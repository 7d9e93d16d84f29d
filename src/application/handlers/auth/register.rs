//! RegisterHandler - admin-only account creation.

use std::sync::Arc;

use tracing::info;

use crate::application::credentials::prepare_credential;
use crate::application::OperationError;
use crate::domain::foundation::{authorize, Action, Principal, Role};
use crate::domain::user::NewUser;
use crate::ports::{CredentialHasher, TokenService, UserRepository};

use super::login::{issue_payload, AuthPayload};

/// Command to register a new account.
#[derive(Debug, Clone)]
pub struct RegisterCommand {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    /// Ignored for admins.
    pub scopes: Option<Vec<String>>,
}

/// Handler for registering users.
pub struct RegisterHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn CredentialHasher>,
    tokens: Arc<dyn TokenService>,
}

impl RegisterHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn CredentialHasher>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    /// Returns a token for the new account, like a login would.
    pub async fn handle(
        &self,
        principal: Option<&Principal>,
        cmd: RegisterCommand,
    ) -> Result<AuthPayload, OperationError> {
        let actor = authorize(principal, &Action::CreateUser)?;

        // Normalizes identifiers and drops admin scopes.
        let mut new_user = NewUser::new(
            &cmd.username,
            &cmd.email,
            String::new(),
            cmd.role,
            cmd.scopes.unwrap_or_default(),
        )?;

        if let Some(field) = self
            .users
            .find_identity_conflict(Some(&new_user.username), Some(&new_user.email), None)
            .await?
        {
            return Err(OperationError::Conflict(field));
        }

        new_user.credential_hash = prepare_credential(self.hasher.as_ref(), &cmd.password).await?;

        let user = self.users.insert(&new_user).await?;
        info!(
            user_id = %user.id,
            role = %user.role,
            created_by = %actor.id,
            "User registered"
        );

        issue_payload(self.tokens.as_ref(), &user)
    }
}
