//! Preparing secrets for storage.
//!
//! Every write path that stores a credential calls [`prepare_credential`]
//! exactly once, right before handing the record to a repository. Nothing is
//! hashed implicitly anywhere else.

use crate::ports::CredentialHasher;

use super::OperationError;

/// Minimum length of a new secret, counted after trimming.
pub const MIN_SECRET_LENGTH: usize = 6;

/// Trims `raw` and hashes it, unless it already is a hash produced by
/// `hasher`, in which case it is stored as-is.
///
/// The pass-through keeps admin updates that resubmit a stored hash from
/// hashing it a second time.
pub async fn prepare_credential(
    hasher: &dyn CredentialHasher,
    raw: &str,
) -> Result<String, OperationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(OperationError::validation("password", "Password is required"));
    }
    if hasher.is_hashed(trimmed) {
        return Ok(trimmed.to_string());
    }
    hasher.hash(trimmed).await.map_err(OperationError::from)
}

/// Checks a user-chosen secret and returns it trimmed.
pub fn validate_new_secret(raw: &str) -> Result<&str, OperationError> {
    let trimmed = raw.trim();
    if trimmed.chars().count() < MIN_SECRET_LENGTH {
        return Err(OperationError::validation(
            "newPassword",
            format!(
                "New password must be at least {} characters",
                MIN_SECRET_LENGTH
            ),
        ));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::PlainHasher;

    #[tokio::test]
    async fn plain_secrets_are_hashed() {
        let hasher = PlainHasher;
        let stored = prepare_credential(&hasher, "  hunter2 ").await.unwrap();
        assert_eq!(stored, "plain$hunter2");
    }

    #[tokio::test]
    async fn existing_hashes_pass_through_untouched() {
        let hasher = PlainHasher;
        let stored = prepare_credential(&hasher, "plain$hunter2").await.unwrap();
        assert_eq!(stored, "plain$hunter2");
    }

    #[tokio::test]
    async fn preparing_twice_is_idempotent() {
        let hasher = PlainHasher;
        let once = prepare_credential(&hasher, "secret").await.unwrap();
        let twice = prepare_credential(&hasher, &once).await.unwrap();
        assert_eq!(once, twice);
    }

    #[tokio::test]
    async fn blank_secrets_are_rejected() {
        let err = prepare_credential(&PlainHasher, "   ").await.unwrap_err();
        assert_eq!(
            err,
            OperationError::validation("password", "Password is required")
        );
    }

    #[test]
    fn new_secret_length_counts_trimmed_characters() {
        assert!(validate_new_secret(" 12345 ").is_err());
        assert_eq!(validate_new_secret(" 123456 ").unwrap(), "123456");
    }
}
