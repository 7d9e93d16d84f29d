//! Domain failures shared by value objects and repositories.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Rejected input, always naming the field at fault.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

/// Stable machine codes carried by [`DomainError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ValidationFailed,

    UserNotFound,
    ShipmentNotFound,

    DuplicateUsername,
    DuplicateEmail,
    DuplicateTrackingNumber,

    Unauthorized,
    Forbidden,

    DatabaseError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::UserNotFound => "USER_NOT_FOUND",
            ErrorCode::ShipmentNotFound => "SHIPMENT_NOT_FOUND",
            ErrorCode::DuplicateUsername => "DUPLICATE_USERNAME",
            ErrorCode::DuplicateEmail => "DUPLICATE_EMAIL",
            ErrorCode::DuplicateTrackingNumber => "DUPLICATE_TRACKING_NUMBER",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        f.write_str(code)
    }
}

/// Unique field whose constraint a write violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConflictField {
    Username,
    Email,
    TrackingNumber,
}

impl ConflictField {
    /// Human-readable failure message.
    pub fn message(&self) -> &'static str {
        match self {
            ConflictField::Username => "Username already exists",
            ConflictField::Email => "Email already exists",
            ConflictField::TrackingNumber => "Tracking number already exists",
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ConflictField::Username => ErrorCode::DuplicateUsername,
            ConflictField::Email => ErrorCode::DuplicateEmail,
            ConflictField::TrackingNumber => ErrorCode::DuplicateTrackingNumber,
        }
    }

    pub fn from_code(code: ErrorCode) -> Option<Self> {
        match code {
            ErrorCode::DuplicateUsername => Some(ConflictField::Username),
            ErrorCode::DuplicateEmail => Some(ConflictField::Email),
            ErrorCode::DuplicateTrackingNumber => Some(ConflictField::TrackingNumber),
            _ => None,
        }
    }

    /// Wire name of the field.
    pub fn field_name(&self) -> &'static str {
        match self {
            ConflictField::Username => "username",
            ConflictField::Email => "email",
            ConflictField::TrackingNumber => "trackingNumber",
        }
    }
}

impl From<ConflictField> for DomainError {
    fn from(field: ConflictField) -> Self {
        DomainError::new(field.code(), field.message()).with_detail("field", field.field_name())
    }
}

/// Failure reported by a repository.
///
/// `details` carries lookup keys such as `id` or `field` that the
/// application layer needs when it maps the error to an operation failure.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message).with_detail("field", field)
    }

    /// Store or driver failure.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        DomainError::validation(err.field().to_string(), err.to_string())
    }
}
