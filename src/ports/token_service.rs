//! Token service port for issuing and verifying bearer tokens.
//!
//! Tokens are opaque to the rest of the application. They carry just enough
//! to find the account again (`id`, `username`, `role`) plus issue and
//! expiry times; the principal itself is always rebuilt from the store.
//!
//! # Contract
//!
//! Implementations must:
//! - Sign with a shared secret and verify the signature on every call
//! - Reject expired tokens with `AuthError::TokenExpired`
//! - Reject anything else that fails verification with `AuthError::InvalidToken`

use crate::domain::foundation::{AuthError, Principal, Role, Timestamp, UserId};

/// Claims recovered from a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub user_id: UserId,
    pub username: String,
    pub role: Role,
    pub issued_at: Timestamp,
    pub expires_at: Timestamp,
}

/// A freshly signed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: Timestamp,
}

/// Issues and verifies bearer tokens.
///
/// Signing and verification are CPU-only, so the port is synchronous.
pub trait TokenService: Send + Sync {
    /// Sign a token for the given principal.
    fn issue(&self, principal: &Principal) -> Result<IssuedToken, AuthError>;

    /// Verify signature and expiry and return the embedded claims.
    ///
    /// # Arguments
    ///
    /// * `token` - The raw token (without "Bearer " prefix)
    fn verify(&self, token: &str) -> Result<TokenClaims, AuthError>;
}
