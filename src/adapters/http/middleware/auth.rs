//! Authentication middleware and extractor for axum.
//!
//! ```text
//! Request → auth_middleware → resolves Bearer token → Principal in extensions
//!                                      ↓
//!                              Handler → OptionalAuth reads from extensions
//! ```
//!
//! A missing, malformed, expired or unknown token never rejects the request:
//! the handler simply sees no principal, and the authorization guard decides.
//! A user store failure during resolution answers 500 instead.

use std::convert::Infallible;
use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::adapters::http::ApiError;
use crate::application::PrincipalResolver;
use crate::domain::foundation::Principal;

/// Auth middleware state - wraps the principal resolver.
pub type AuthState = Arc<PrincipalResolver>;

/// Resolves the `Authorization` header and injects the `Principal`.
pub async fn auth_middleware(
    State(resolver): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(str::to_owned);

    match resolver.resolve_header(header.as_deref()).await {
        Ok(Some(principal)) => {
            request.extensions_mut().insert(principal);
        }
        Ok(None) => {}
        Err(e) => return ApiError(e).into_response(),
    }

    next.run(request).await
}

/// The caller's principal, if the request carried a valid token.
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<Principal>);

impl OptionalAuth {
    pub fn principal(&self) -> Option<&Principal> {
        self.0.as_ref()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuth(parts.extensions.get::<Principal>().cloned()))
    }
}
