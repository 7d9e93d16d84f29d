//! Shipment Tracker server binary.

use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use shipment_tracker::adapters::auth::{Argon2CredentialHasher, JwtTokenService};
use shipment_tracker::adapters::events::ShipmentBroadcaster;
use shipment_tracker::adapters::http::{build_router, AppState};
use shipment_tracker::adapters::memory::{InMemoryShipmentRepository, InMemoryUserRepository};
use shipment_tracker::adapters::postgres::{
    create_pool, run_migrations, PostgresShipmentRepository, PostgresUserRepository,
};
use shipment_tracker::application::ensure_default_admin;
use shipment_tracker::config::AppConfig;
use shipment_tracker::ports::{ShipmentRepository, UserRepository};

#[tokio::main]
async fn main() {
    let config = AppConfig::load().expect("Failed to load configuration");

    init_tracing(&config);

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    }

    let (users, shipments) = build_stores(&config).await;

    let hasher = Arc::new(Argon2CredentialHasher::new());
    let tokens = Arc::new(JwtTokenService::new(
        &config.auth.jwt_secret,
        config.auth.token_ttl_hours,
    ));

    if let Some(admin) = config.bootstrap.default_admin() {
        match ensure_default_admin(users.as_ref(), hasher.as_ref(), &admin).await {
            Ok(Some(profile)) => {
                tracing::warn!(username = %profile.username, "Default admin created, change its password")
            }
            Ok(None) => tracing::debug!("Users present, default admin not needed"),
            Err(e) => tracing::error!(error = %e, "Failed to create default admin"),
        }
    }

    let broadcaster = ShipmentBroadcaster::new(config.subscriptions.buffer);
    let state = AppState::new(
        users,
        shipments,
        hasher,
        tokens,
        broadcaster,
        config.subscriptions.clone(),
    );
    let app = build_router(state, &config.server);

    let addr = config
        .server
        .socket_addr()
        .expect("Server address was validated");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");
    tracing::info!(
        environment = ?config.server.environment,
        "shipment-tracker listening on http://{}",
        addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// PostgreSQL when a database URL is configured, otherwise the in-memory store.
async fn build_stores(config: &AppConfig) -> (Arc<dyn UserRepository>, Arc<dyn ShipmentRepository>) {
    if !config.database.is_configured() {
        tracing::warn!("No database configured, records are kept in memory only");
        let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
        let shipments: Arc<dyn ShipmentRepository> = Arc::new(InMemoryShipmentRepository::new());
        return (users, shipments);
    }

    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database pool");
    if config.database.run_migrations {
        run_migrations(&pool)
            .await
            .expect("Failed to run database migrations");
        tracing::info!("Database migrations applied");
    }
    tracing::info!("Using PostgreSQL store");

    let users: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(pool.clone()));
    let shipments: Arc<dyn ShipmentRepository> = Arc::new(PostgresShipmentRepository::new(pool));
    (users, shipments)
}

/// JSON logs in production, human-readable text elsewhere.
///
/// `RUST_LOG` overrides the configured level.
fn init_tracing(config: &AppConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.server.log_level.clone().into());

    let json = config.is_production();
    let json_layer = json.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!json).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
