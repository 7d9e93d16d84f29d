//! PrincipalResolver - turns a bearer token into the acting principal.
//!
//! A missing, malformed, expired or orphaned token yields no principal, and
//! the authorization guard decides what that means for the operation at hand.
//! Only a failing user store is an error.

use std::sync::Arc;

use tracing::{debug, error};

use crate::application::OperationError;
use crate::domain::foundation::{AuthError, Principal};
use crate::ports::{TokenService, UserRepository};

/// Strips an optional `Bearer ` prefix (case-insensitive) and surrounding
/// whitespace. Returns `None` for an empty token.
pub fn bearer_token(raw: &str) -> Option<&str> {
    let raw = raw.trim();
    let token = match raw.get(..7) {
        Some(prefix) if prefix.eq_ignore_ascii_case("bearer ") => raw[7..].trim(),
        _ => raw,
    };
    (!token.is_empty()).then_some(token)
}

/// Resolves tokens against the token service and the user store.
pub struct PrincipalResolver {
    tokens: Arc<dyn TokenService>,
    users: Arc<dyn UserRepository>,
}

impl PrincipalResolver {
    pub fn new(tokens: Arc<dyn TokenService>, users: Arc<dyn UserRepository>) -> Self {
        Self { tokens, users }
    }

    /// Verifies `token` and loads the referenced user.
    ///
    /// The principal is built from the stored row, so role and scope changes
    /// made after the token was issued are honored.
    pub async fn resolve(&self, token: &str) -> Result<Option<Principal>, OperationError> {
        let claims = match self.tokens.verify(token) {
            Ok(claims) => claims,
            Err(AuthError::TokenExpired) => {
                debug!("Bearer token expired");
                return Ok(None);
            }
            Err(e) => {
                debug!(error = %e, "Bearer token rejected");
                return Ok(None);
            }
        };

        match self.users.find_by_id(&claims.user_id).await {
            Ok(Some(user)) => Ok(Some(user.principal())),
            Ok(None) => {
                debug!(user_id = %claims.user_id, "Token refers to a deleted user");
                Ok(None)
            }
            Err(e) => {
                error!(user_id = %claims.user_id, error = %e, "Failed to load token user");
                Err(e.into())
            }
        }
    }

    /// Convenience for transports: accepts a raw header value.
    pub async fn resolve_header(
        &self,
        header: Option<&str>,
    ) -> Result<Option<Principal>, OperationError> {
        match header.and_then(bearer_token) {
            Some(token) => self.resolve(token).await,
            None => Ok(None),
        }
    }
}
