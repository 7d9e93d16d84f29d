//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresUserRepository` - user accounts
//! - `PostgresShipmentRepository` - shipments with filtered, sorted listing
//!
//! Unique-constraint violations surface as duplicate codes so callers see a
//! Conflict even when a concurrent writer wins the race past the pre-check.

mod shipment_repository;
mod user_repository;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;
use crate::domain::foundation::{ConflictField, DomainError, ErrorCode};

pub use shipment_repository::PostgresShipmentRepository;
pub use user_repository::PostgresUserRepository;

const UNIQUE_VIOLATION: &str = "23505";

/// Creates a bounded connection pool.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .connect(config.url.expose_secret())
        .await
}

/// Applies pending schema migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Maps a sqlx error to a domain error, recognizing unique violations.
pub(crate) fn map_sqlx_error(e: sqlx::Error, context: &str) -> DomainError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            if let Some(field) = conflict_for_constraint(db_err.constraint()) {
                return field.into();
            }
        }
    }
    tracing::error!(error = %e, "{}", context);
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

fn conflict_for_constraint(constraint: Option<&str>) -> Option<ConflictField> {
    match constraint? {
        "users_username_key" => Some(ConflictField::Username),
        "users_email_key" => Some(ConflictField::Email),
        "shipments_tracking_number_key" => Some(ConflictField::TrackingNumber),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_constraints_map_to_conflict_fields() {
        assert_eq!(
            conflict_for_constraint(Some("users_email_key")),
            Some(ConflictField::Email)
        );
        assert_eq!(
            conflict_for_constraint(Some("shipments_tracking_number_key")),
            Some(ConflictField::TrackingNumber)
        );
        assert_eq!(conflict_for_constraint(Some("other_key")), None);
        assert_eq!(conflict_for_constraint(None), None);
    }

    #[test]
    fn non_database_errors_become_database_error() {
        let err = map_sqlx_error(sqlx::Error::RowNotFound, "Failed to fetch user");
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(err.message.starts_with("Failed to fetch user"));
    }
}
