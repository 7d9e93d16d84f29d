//! Shared wiring for integration tests: real adapters over the in-memory store.

#![allow(dead_code)]

use std::sync::Arc;

use secrecy::SecretString;

use shipment_tracker::adapters::auth::{Argon2CredentialHasher, JwtTokenService};
use shipment_tracker::adapters::events::ShipmentBroadcaster;
use shipment_tracker::adapters::http::AppState;
use shipment_tracker::adapters::memory::{InMemoryShipmentRepository, InMemoryUserRepository};
use shipment_tracker::application::{ensure_default_admin, DefaultAdmin};
use shipment_tracker::config::SubscriptionConfig;

pub const ADMIN_PASSWORD: &str = "admin123";

pub struct TestApp {
    pub state: AppState,
    pub users: Arc<InMemoryUserRepository>,
    pub shipments: Arc<InMemoryShipmentRepository>,
    pub broadcaster: ShipmentBroadcaster,
}

impl TestApp {
    /// Fresh store with the default admin already bootstrapped.
    pub async fn start() -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let shipments = Arc::new(InMemoryShipmentRepository::new());
        let hasher = Arc::new(Argon2CredentialHasher::fast().expect("argon2 params"));
        let tokens = Arc::new(JwtTokenService::new(
            &SecretString::new("integration-test-secret-with-enough-bytes".into()),
            1,
        ));
        let broadcaster = ShipmentBroadcaster::default();

        let admin = DefaultAdmin {
            username: "admin".into(),
            email: "admin@tms.com".into(),
            password: SecretString::new(ADMIN_PASSWORD.into()),
        };
        ensure_default_admin(users.as_ref(), hasher.as_ref(), &admin)
            .await
            .expect("bootstrap")
            .expect("admin created");

        let state = AppState::new(
            users.clone(),
            shipments.clone(),
            hasher,
            tokens,
            broadcaster.clone(),
            SubscriptionConfig::default(),
        );

        Self {
            state,
            users,
            shipments,
            broadcaster,
        }
    }
}
