//! User repository port.
//!
//! Defines the contract for persisting and retrieving user accounts.
//!
//! # Design
//!
//! - **Normalized input**: callers hand over lowercase identifiers; the port
//!   performs exact matches only
//! - **Constraint-backed uniqueness**: `insert`/`update` report collisions as
//!   `DuplicateUsername`/`DuplicateEmail` even when a pre-check raced

use crate::domain::foundation::{ConflictField, DomainError, UserId};
use crate::domain::user::{NewUser, User, UserPatch};
use async_trait::async_trait;

/// Repository port for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by id.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Exact match on the normalized username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Exact match on the normalized email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Looks for another account already holding `username` or `email` in a
    /// single round trip.
    ///
    /// A username collision wins over an email collision. `excluding` skips
    /// the record being updated.
    async fn find_identity_conflict(
        &self,
        username: Option<&str>,
        email: Option<&str>,
        excluding: Option<&UserId>,
    ) -> Result<Option<ConflictField>, DomainError>;

    /// All users ordered by id.
    async fn list_all(&self) -> Result<Vec<User>, DomainError>;

    /// Number of stored users.
    async fn count(&self) -> Result<u64, DomainError>;

    /// Insert a new user and return the stored record.
    ///
    /// # Errors
    ///
    /// - `DuplicateUsername` / `DuplicateEmail` on a unique violation
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, user: &NewUser) -> Result<User, DomainError>;

    /// Apply a partial update and return the post-update record.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the user doesn't exist
    /// - `DuplicateUsername` / `DuplicateEmail` on a unique violation
    /// - `DatabaseError` on persistence failure
    async fn update(&self, id: &UserId, patch: &UserPatch) -> Result<User, DomainError>;

    /// Delete a user.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the user doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn delete(&self, id: &UserId) -> Result<(), DomainError>;
}
