//! LoginHandler - exchanges an identifier and secret for a bearer token.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::{LoginIdentifier, OperationError};
use crate::domain::foundation::Timestamp;
use crate::domain::user::{normalize_identifier, User, UserProfile};
use crate::ports::{CredentialHasher, TokenService, UserRepository};

/// Command to log in. Email wins when both identifiers are given.
#[derive(Debug, Clone, Default)]
pub struct LoginCommand {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Token plus the sanitized account it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthPayload {
    pub token: String,
    pub expires_at: Timestamp,
    pub user: UserProfile,
}

/// Signs a token for `user` and pairs it with the profile.
pub(crate) fn issue_payload(
    tokens: &dyn TokenService,
    user: &User,
) -> Result<AuthPayload, OperationError> {
    let issued = tokens
        .issue(&user.principal())
        .map_err(|e| OperationError::internal(e.to_string()))?;
    Ok(AuthPayload {
        token: issued.token,
        expires_at: issued.expires_at,
        user: user.profile(),
    })
}

/// Handler for logging in.
pub struct LoginHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn CredentialHasher>,
    tokens: Arc<dyn TokenService>,
}

impl LoginHandler {
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

    pub async fn handle(&self, cmd: LoginCommand) -> Result<AuthPayload, OperationError> {
        let password = cmd.password.unwrap_or_default();
        if password.is_empty() {
            return Err(OperationError::validation("password", "Password is required"));
        }

        let email = cmd
            .email
            .map(|e| normalize_identifier(&e))
            .filter(|e| !e.is_empty());
        let username = cmd
            .username
            .map(|u| normalize_identifier(&u))
            .filter(|u| !u.is_empty());

        let (identifier, user) = match (email, username) {
            (Some(email), _) => (
                LoginIdentifier::Email,
                self.users.find_by_email(&email).await?,
            ),
            (None, Some(username)) => (
                LoginIdentifier::Username,
                self.users.find_by_username(&username).await?,
            ),
            (None, None) => {
                return Err(OperationError::validation(
                    "username",
                    "Username or email is required",
                ))
            }
        };

        let user = user.ok_or(OperationError::IdentifierNotFound(identifier))?;

        let matches = match user.credential_hash.as_deref() {
            Some(stored) => self.hasher.verify(&password, stored).await,
            None => false,
        };
        if !matches {
            warn!(user_id = %user.id, "Login rejected: credential mismatch");
            return Err(OperationError::InvalidCredential);
        }

        info!(user_id = %user.id, role = %user.role, "User logged in");
        issue_payload(self.tokens.as_ref(), &user)
    }
}
