//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Argon2 credential hashing, JWT tokens
//! - `events` - In-process shipment event fan-out
//! - `http` - REST API over axum
//! - `memory` - In-memory repositories
//! - `postgres` - PostgreSQL repositories and migrations
//! - `websocket` - Live subscription protocol

pub mod auth;
pub mod events;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod websocket;

pub use auth::{Argon2CredentialHasher, JwtTokenService};
pub use events::ShipmentBroadcaster;
pub use memory::{InMemoryShipmentRepository, InMemoryUserRepository};
pub use postgres::{PostgresShipmentRepository, PostgresUserRepository};
