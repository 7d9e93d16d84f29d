//! Argon2id credential hasher.

use argon2::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::CredentialHasher;

const HASH_PREFIX: &str = "$argon2";

/// Hashes secrets with Argon2id on the blocking pool.
#[derive(Clone)]
pub struct Argon2CredentialHasher {
    params: Params,
}

impl Argon2CredentialHasher {
    /// Library-default cost parameters.
    pub fn new() -> Self {
        Self {
            params: Params::default(),
        }
    }

    /// Minimal cost parameters for tests.
    pub fn fast() -> Result<Self, DomainError> {
        let params = Params::new(Params::MIN_M_COST, 1, 1, None)
            .map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl Default for Argon2CredentialHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialHasher for Argon2CredentialHasher {
    async fn hash(&self, secret: &str) -> Result<String, DomainError> {
        let secret = secret.trim().to_owned();
        let argon2 = self.argon2();

        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            argon2
                .hash_password(secret.as_bytes(), &salt)
                .map(|hash| hash.to_string())
        })
        .await
        .map_err(|e| DomainError::new(ErrorCode::InternalError, format!("Hash task failed: {}", e)))?
        .map_err(|e| DomainError::new(ErrorCode::InternalError, format!("Hashing failed: {}", e)))
    }

    async fn verify(&self, candidate: &str, stored_hash: &str) -> bool {
        let candidate = candidate.trim().to_owned();
        let stored = stored_hash.trim().to_owned();
        if candidate.is_empty() || stored.is_empty() {
            return false;
        }
        let argon2 = self.argon2();

        tokio::task::spawn_blocking(move || {
            let Ok(parsed) = PasswordHash::new(&stored) else {
                return false;
            };
            argon2.verify_password(candidate.as_bytes(), &parsed).is_ok()
        })
        .await
        .unwrap_or(false)
    }

    fn is_hashed(&self, value: &str) -> bool {
        value.trim_start().starts_with(HASH_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_then_verify() {
        let hasher = Argon2CredentialHasher::fast().unwrap();
        let hash = hasher.hash("s3cret").await.unwrap();

        assert!(hasher.is_hashed(&hash));
        assert!(hasher.verify("s3cret", &hash).await);
        assert!(hasher.verify("  s3cret  ", &hash).await);
        assert!(!hasher.verify("wrong", &hash).await);
    }

    #[tokio::test]
    async fn salts_differ_between_hashes() {
        let hasher = Argon2CredentialHasher::fast().unwrap();
        let a = hasher.hash("same").await.unwrap();
        let b = hasher.hash("same").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn garbage_and_empty_never_verify() {
        let hasher = Argon2CredentialHasher::fast().unwrap();
        assert!(!hasher.verify("pw", "not-a-hash").await);
        assert!(!hasher.verify("", "$argon2id$v=19$m=8,t=1,p=1$abc$def").await);
        assert!(!hasher.is_hashed("plaintext"));
    }
}
