//! Failures raised while reading or checking settings.

use thiserror::Error;

/// Top-level failure of [`super::AppConfig::load`] or its validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("configuration rejected: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// A setting that parsed but is unusable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} must be set")]
    MissingRequired(&'static str),

    #[error("server host is not a bindable address")]
    InvalidHost,

    #[error("server port must be non-zero")]
    InvalidPort,

    #[error("timeout is outside the accepted range")]
    InvalidTimeout,

    #[error("database url must use the postgres:// or postgresql:// scheme")]
    InvalidDatabaseUrl,

    #[error("database min_connections is larger than max_connections")]
    InvalidPoolSize,

    #[error("database max_connections may not exceed 100")]
    PoolSizeTooLarge,

    #[error("production jwt secret needs at least {0} bytes")]
    WeakJwtSecret(usize),

    #[error("token lifetime must be between 1 and 720 hours")]
    InvalidTokenTtl,

    #[error("default admin email is not a valid address")]
    InvalidAdminEmail,

    #[error("subscription buffer must hold at least one event")]
    InvalidSubscriptionBuffer,
}
