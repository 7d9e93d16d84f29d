//! Authentication types for the domain layer.
//!
//! A [`Principal`] is the identity an operation acts on behalf of. It is
//! rebuilt from the stored user row on every request, never from token claims
//! alone, so role and scope changes take effect immediately.
//!
//! # Example
//!
//! ```ignore
//! // In HTTP middleware, after the bearer token resolves:
//! if let Some(principal) = resolver.resolve(token).await? {
//!     request.extensions_mut().insert(principal);
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::{UserId, ValidationError};

/// Account role.
///
/// Admins have implicit full access; scopes only mean something for employees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Employee,
}

impl Role {
    /// Wire and storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Employee => "EMPLOYEE",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Employee
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Role::Admin),
            "EMPLOYEE" => Ok(Role::Employee),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("unknown role '{}'", other),
            )),
        }
    }
}

/// Authenticated identity attached to a request or subscription.
///
/// Never carries the credential hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub id: UserId,
    pub username: String,
    pub role: Role,
    pub scopes: Vec<String>,
}

impl Principal {
    pub fn new(id: UserId, username: impl Into<String>, role: Role, scopes: Vec<String>) -> Self {
        Self {
            id,
            username: username.into(),
            role,
            scopes,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Returns true if the principal holds the scope, or is an admin.
    pub fn has_scope(&self, scope: &str) -> bool {
        self.is_admin() || self.scopes.iter().any(|s| s == scope)
    }
}

/// Failures while turning a bearer token into claims.
///
/// These never reach the caller of an operation: the resolver maps every
/// variant to "no principal".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired.
    #[error("Token expired")]
    TokenExpired,

    /// Token is valid but the user no longer exists.
    #[error("User not found")]
    UserNotFound,

    /// Token could not be produced.
    #[error("Token signing failed: {0}")]
    SigningFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(scopes: &[&str]) -> Principal {
        Principal::new(
            UserId::new(2),
            "worker",
            Role::Employee,
            scopes.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(" EMPLOYEE ".parse::<Role>().unwrap(), Role::Employee);
    }

    #[test]
    fn role_rejects_unknown_values() {
        assert!("SUPERVISOR".parse::<Role>().is_err());
    }

    #[test]
    fn role_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        assert_eq!(
            serde_json::from_str::<Role>("\"EMPLOYEE\"").unwrap(),
            Role::Employee
        );
    }

    #[test]
    fn employee_scope_check_uses_assigned_scopes() {
        let p = employee(&["shipments:write"]);
        assert!(p.has_scope("shipments:write"));
        assert!(!p.has_scope("users:read"));
    }

    #[test]
    fn admin_has_every_scope() {
        let p = Principal::new(UserId::new(1), "admin", Role::Admin, vec![]);
        assert!(p.has_scope("anything"));
    }

    #[test]
    fn auth_error_messages_are_generic() {
        assert_eq!(AuthError::InvalidToken.to_string(), "Invalid or expired token");
    }
}
