//! User account records.
//!
//! # Invariants
//!
//! - `username` and `email` are stored trimmed and lowercased, so lookups are
//!   case-insensitive by construction
//! - an `ADMIN` never carries scopes
//! - the credential hash never leaves the application layer; transports only
//!   see [`UserProfile`]

use serde::Serialize;

use crate::domain::foundation::{Principal, Role, Timestamp, UserId, ValidationError};

/// Trims and lowercases a username or email.
pub fn normalize_identifier(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Minimal structural email check: one `@`, non-empty local part, dotted domain.
pub fn is_valid_email(email: &str) -> bool {
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    !local.is_empty()
        && !email.chars().any(char::is_whitespace)
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

/// Enforces the admin/scopes coupling.
pub fn effective_scopes(role: Role, scopes: Vec<String>) -> Vec<String> {
    if role.is_admin() {
        Vec::new()
    } else {
        scopes
    }
}

/// Stored user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    /// `None` only for legacy rows; such accounts cannot log in.
    pub credential_hash: Option<String>,
    pub role: Role,
    pub scopes: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// Sanitized view safe to hand to transports.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            role: self.role,
            scopes: self.scopes.clone(),
        }
    }

    /// Identity for authorization decisions.
    pub fn principal(&self) -> Principal {
        Principal::new(self.id, self.username.clone(), self.role, self.scopes.clone())
    }
}

/// User without its credential hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub scopes: Vec<String>,
}

/// Validated data for inserting a user.
///
/// The credential must already be prepared for storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub credential_hash: String,
    pub role: Role,
    pub scopes: Vec<String>,
}

impl NewUser {
    pub fn new(
        username: &str,
        email: &str,
        credential_hash: String,
        role: Role,
        scopes: Vec<String>,
    ) -> Result<Self, ValidationError> {
        let username = normalize_identifier(username);
        let email = normalize_identifier(email);

        if username.is_empty() {
            return Err(ValidationError::empty_field("username"));
        }
        if email.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if !is_valid_email(&email) {
            return Err(ValidationError::invalid_format(
                "email",
                "must be a valid email address",
            ));
        }

        Ok(Self {
            username,
            email,
            credential_hash,
            role,
            scopes: effective_scopes(role, scopes),
        })
    }
}

/// Partial update of a user; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub credential_hash: Option<String>,
    pub role: Option<Role>,
    pub scopes: Option<Vec<String>>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.credential_hash.is_none()
            && self.role.is_none()
            && self.scopes.is_none()
    }

    /// Normalizes identifiers and applies the admin/scopes rule against the
    /// role the record will have after the update.
    pub fn normalized(mut self, current_role: Role) -> Result<Self, ValidationError> {
        if let Some(username) = self.username.take() {
            let username = normalize_identifier(&username);
            if username.is_empty() {
                return Err(ValidationError::empty_field("username"));
            }
            self.username = Some(username);
        }

        if let Some(email) = self.email.take() {
            let email = normalize_identifier(&email);
            if !is_valid_email(&email) {
                return Err(ValidationError::invalid_format(
                    "email",
                    "must be a valid email address",
                ));
            }
            self.email = Some(email);
        }

        let resulting_role = self.role.unwrap_or(current_role);
        if resulting_role.is_admin() && (self.role.is_some() || self.scopes.is_some()) {
            self.scopes = Some(Vec::new());
        }

        Ok(self)
    }
}
