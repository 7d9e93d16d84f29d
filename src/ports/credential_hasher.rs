//! Credential hasher port.
//!
//! One-way hashing of account secrets. The algorithm is an adapter concern;
//! the application only relies on three things:
//!
//! - `hash` never returns the input unchanged
//! - `verify` answers `false` instead of failing for empty or malformed input
//! - `is_hashed` recognizes the adapter's own output, so an already prepared
//!   credential is never hashed twice

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

/// Hashes and verifies account secrets.
///
/// Hashing is deliberately slow, so both operations are async and must not
/// block the runtime.
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    /// Hash a secret for storage.
    ///
    /// # Errors
    ///
    /// - `InternalError` if the hashing backend fails
    async fn hash(&self, secret: &str) -> Result<String, DomainError>;

    /// Check a candidate secret against a stored hash.
    ///
    /// Both values are trimmed first. Empty values and unparseable hashes
    /// yield `false`.
    async fn verify(&self, candidate: &str, stored_hash: &str) -> bool;

    /// Whether `value` already looks like output of `hash`.
    fn is_hashed(&self, value: &str) -> bool;
}
