//! Token signing settings.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Development-only signing secret used when none is configured.
pub const DEV_JWT_SECRET: &str = "dev-only-secret-change-me";

/// Minimum secret length accepted in production.
pub const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// `AUTH__*` settings for issuing and checking bearer tokens.
#[derive(Debug, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing key.
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: SecretString,

    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
}

impl AuthConfig {
    /// Production refuses the development secret and short secrets.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if *environment == Environment::Production
            && (secret == DEV_JWT_SECRET || secret.len() < MIN_PRODUCTION_SECRET_LEN)
        {
            return Err(ValidationError::WeakJwtSecret(MIN_PRODUCTION_SECRET_LEN));
        }
        if !(1..=720).contains(&self.token_ttl_hours) {
            return Err(ValidationError::InvalidTokenTtl);
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            token_ttl_hours: default_token_ttl_hours(),
        }
    }
}

fn default_jwt_secret() -> SecretString {
    SecretString::new(DEV_JWT_SECRET.to_string())
}

fn default_token_ttl_hours() -> i64 {
    7
}
