//! Default admin bootstrap configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use crate::application::DefaultAdmin;
use crate::domain::user::{is_valid_email, normalize_identifier};

/// Account created at startup when no users exist
#[derive(Debug, Deserialize)]
pub struct BootstrapConfig {
    /// Create the default admin on an empty user table
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default = "default_admin_username")]
    pub admin_username: String,

    #[serde(default = "default_admin_email")]
    pub admin_email: String,

    #[serde(default = "default_admin_password")]
    pub admin_password: SecretString,
}

impl BootstrapConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.enabled {
            return Ok(());
        }
        if self.admin_username.trim().is_empty() {
            return Err(ValidationError::MissingRequired("BOOTSTRAP__ADMIN_USERNAME"));
        }
        if !is_valid_email(&normalize_identifier(&self.admin_email)) {
            return Err(ValidationError::InvalidAdminEmail);
        }
        Ok(())
    }

    /// The admin to create, or `None` when bootstrapping is disabled.
    pub fn default_admin(&self) -> Option<DefaultAdmin> {
        self.enabled.then(|| DefaultAdmin {
            username: self.admin_username.clone(),
            email: self.admin_email.clone(),
            password: SecretString::new(self.admin_password.expose_secret().clone()),
        })
    }
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            admin_username: default_admin_username(),
            admin_email: default_admin_email(),
            admin_password: default_admin_password(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_admin_email() -> String {
    "admin@tms.com".to_string()
}

fn default_admin_password() -> SecretString {
    SecretString::new("admin123".to_string())
}
