//! Default admin bootstrap.
//!
//! A fresh installation has no accounts, and only an admin can register new
//! ones. On startup, an empty user collection gets one admin account.

use secrecy::{ExposeSecret, SecretString};
use tracing::info;

use crate::domain::foundation::Role;
use crate::domain::user::{NewUser, UserProfile};
use crate::ports::{CredentialHasher, UserRepository};

use super::credentials::prepare_credential;
use super::OperationError;

/// Account created when the store holds no users.
#[derive(Debug)]
pub struct DefaultAdmin {
    pub username: String,
    pub email: String,
    pub password: SecretString,
}

/// Creates `admin` if and only if no user exists yet.
///
/// Returns the created profile, or `None` when the store already had users.
/// Callers treat an error as non-fatal.
pub async fn ensure_default_admin(
    users: &dyn UserRepository,
    hasher: &dyn CredentialHasher,
    admin: &DefaultAdmin,
) -> Result<Option<UserProfile>, OperationError> {
    if users.count().await? > 0 {
        return Ok(None);
    }

    let mut new_user = NewUser::new(
        &admin.username,
        &admin.email,
        String::new(),
        Role::Admin,
        Vec::new(),
    )?;
    new_user.credential_hash = prepare_credential(hasher, admin.password.expose_secret()).await?;

    let user = users.insert(&new_user).await?;
    info!(user_id = %user.id, username = %user.username, "Created default admin account");
    Ok(Some(user.profile()))
}
