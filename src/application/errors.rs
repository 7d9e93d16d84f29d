//! Operation error taxonomy.
//!
//! Every handler returns `Result<_, OperationError>`. Transports map the
//! variants to their own status vocabulary; the `Display` text is the
//! human-readable failure shown to callers.

use thiserror::Error;

use crate::domain::foundation::{
    ConflictField, Denial, DomainError, ErrorCode, ShipmentId, UserId, ValidationError,
};

/// Which identifier a login attempt used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginIdentifier {
    Email,
    Username,
}

impl LoginIdentifier {
    pub fn not_found_message(&self) -> &'static str {
        match self {
            LoginIdentifier::Email => "Email not found",
            LoginIdentifier::Username => "Username not found",
        }
    }
}

/// Kind of record a lookup missed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    User,
    Shipment,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::User => "User",
            Resource::Shipment => "Shipment",
        }
    }
}

/// Failures surfaced by the operation handlers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationError {
    /// No principal, or the token did not resolve to one.
    #[error("Authentication required")]
    AuthenticationRequired,

    /// Valid principal lacking the role, or blocked by self-protection.
    #[error("{0}")]
    AuthorizationDenied(String),

    /// An id-based lookup missed on update or delete.
    #[error("{} not found", resource.as_str())]
    NotFound { resource: Resource, id: String },

    /// A unique field is already taken.
    #[error("{}", .0.message())]
    Conflict(ConflictField),

    /// Malformed input.
    #[error("{message}")]
    Validation { field: String, message: String },

    /// Login identifier does not match any account.
    #[error("{}", .0.not_found_message())]
    IdentifierNotFound(LoginIdentifier),

    /// Login secret does not match the stored credential.
    #[error("Password is incorrect")]
    InvalidCredential,

    /// `changePassword` was given the wrong current secret.
    #[error("Current password is incorrect")]
    CurrentCredentialMismatch,

    /// Unexpected store or infrastructure failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl OperationError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        OperationError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn user_not_found(id: &UserId) -> Self {
        OperationError::NotFound {
            resource: Resource::User,
            id: id.to_string(),
        }
    }

    pub fn shipment_not_found(id: &ShipmentId) -> Self {
        OperationError::NotFound {
            resource: Resource::Shipment,
            id: id.to_string(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        OperationError::Internal(message.into())
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            OperationError::AuthenticationRequired
            | OperationError::IdentifierNotFound(_)
            | OperationError::InvalidCredential => ErrorCode::Unauthorized,
            OperationError::AuthorizationDenied(_) => ErrorCode::Forbidden,
            OperationError::NotFound {
                resource: Resource::User,
                ..
            } => ErrorCode::UserNotFound,
            OperationError::NotFound {
                resource: Resource::Shipment,
                ..
            } => ErrorCode::ShipmentNotFound,
            OperationError::Conflict(field) => field.code(),
            OperationError::Validation { .. } | OperationError::CurrentCredentialMismatch => {
                ErrorCode::ValidationFailed
            }
            OperationError::Internal(_) => ErrorCode::InternalError,
        }
    }
}

impl From<Denial> for OperationError {
    fn from(denial: Denial) -> Self {
        match denial {
            Denial::AuthenticationRequired => OperationError::AuthenticationRequired,
            Denial::AuthorizationDenied(reason) => OperationError::AuthorizationDenied(reason),
        }
    }
}

impl From<ValidationError> for OperationError {
    fn from(err: ValidationError) -> Self {
        OperationError::Validation {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for OperationError {
    fn from(err: DomainError) -> Self {
        if let Some(field) = ConflictField::from_code(err.code) {
            return OperationError::Conflict(field);
        }
        let detail = |key: &str| err.details.get(key).cloned().unwrap_or_default();
        match err.code {
            ErrorCode::UserNotFound => OperationError::NotFound {
                resource: Resource::User,
                id: detail("id"),
            },
            ErrorCode::ShipmentNotFound => OperationError::NotFound {
                resource: Resource::Shipment,
                id: detail("id"),
            },
            ErrorCode::ValidationFailed => OperationError::Validation {
                field: detail("field"),
                message: err.message,
            },
            ErrorCode::Unauthorized => OperationError::AuthenticationRequired,
            ErrorCode::Forbidden => OperationError::AuthorizationDenied(err.message),
            _ => OperationError::Internal(err.to_string()),
        }
    }
}
