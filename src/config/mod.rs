//! Settings for the tracker service.
//!
//! Everything comes from the process environment (plus an optional `.env`
//! file) under the `SHIPMENT_TRACKER` prefix, with `__` separating the
//! section from the key: `SHIPMENT_TRACKER__SERVER__PORT=9000`.
//!
//! ```no_run
//! use shipment_tracker::config::AppConfig;
//!
//! let config = AppConfig::load().expect("settings should parse");
//! config.validate().expect("settings should be usable");
//! ```

mod auth;
mod bootstrap;
mod database;
mod error;
mod server;
mod subscriptions;

pub use auth::{AuthConfig, DEV_JWT_SECRET, MIN_PRODUCTION_SECRET_LEN};
pub use bootstrap::BootstrapConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use subscriptions::SubscriptionConfig;

use serde::Deserialize;

/// All settings sections.
///
/// Each section defaults independently, so a bare environment boots a
/// development server on the in-memory store.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub bootstrap: BootstrapConfig,
    pub subscriptions: SubscriptionConfig,
}

impl AppConfig {
    /// Reads `.env` when present, then the prefixed environment.
    ///
    /// Fails only when a value cannot be parsed into its field type;
    /// semantic checks live in [`AppConfig::validate`].
    pub fn load() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let source = config::Environment::default()
            .prefix("SHIPMENT_TRACKER")
            .separator("__");
        let settings = config::Config::builder().add_source(source).build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Runs each section's checks, then the cross-section rules.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.bootstrap.validate()?;
        self.subscriptions.validate()?;

        // Production never runs on the in-memory store.
        if self.is_production() && !self.database.is_configured() {
            return Err(ValidationError::MissingRequired("DATABASE__URL"));
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
