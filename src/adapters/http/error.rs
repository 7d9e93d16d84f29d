//! Maps operation failures to HTTP responses.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::application::OperationError;
use crate::domain::foundation::ValidationError;

/// Error body: `{ code, message, details? }`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Wrapper that turns an `OperationError` into a response.
#[derive(Debug)]
pub struct ApiError(pub OperationError);

impl From<OperationError> for ApiError {
    fn from(err: OperationError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(OperationError::validation("body", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(OperationError::validation("query", rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self(OperationError::validation("id", rejection.body_text()))
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            OperationError::AuthenticationRequired
            | OperationError::IdentifierNotFound(_)
            | OperationError::InvalidCredential => StatusCode::UNAUTHORIZED,
            OperationError::AuthorizationDenied(_) => StatusCode::FORBIDDEN,
            OperationError::NotFound { .. } => StatusCode::NOT_FOUND,
            OperationError::Conflict(_) => StatusCode::CONFLICT,
            OperationError::Validation { .. } | OperationError::CurrentCredentialMismatch => {
                StatusCode::BAD_REQUEST
            }
            OperationError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.0.code().to_string();

        let body = match &self.0 {
            OperationError::Internal(detail) => {
                tracing::error!(error = %detail, "Request failed");
                ErrorResponse::new(code, "Internal server error")
            }
            OperationError::Validation { field, message } => ErrorResponse::new(code, message)
                .with_details(serde_json::json!({ "field": field })),
            OperationError::Conflict(field) => ErrorResponse::new(code, field.message())
                .with_details(serde_json::json!({ "field": field.field_name() })),
            OperationError::NotFound { id, .. } => ErrorResponse::new(code, self.0.to_string())
                .with_details(serde_json::json!({ "id": id })),
            other => ErrorResponse::new(code, other.to_string()),
        };

        (status, Json(body)).into_response()
    }
}
