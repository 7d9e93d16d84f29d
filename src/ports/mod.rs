//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `UserRepository` - User accounts
//! - `ShipmentRepository` - Shipments, including filtered listings
//!
//! ## Security Ports
//!
//! - `CredentialHasher` - One-way hashing of account secrets
//! - `TokenService` - Bearer token issue and verification
//!
//! ## Event Ports
//!
//! - `EventPublisher` - Best-effort fan-out of shipment changes

mod credential_hasher;
mod event_publisher;
mod shipment_repository;
mod token_service;
mod user_repository;

pub use credential_hasher::CredentialHasher;
pub use event_publisher::EventPublisher;
pub use shipment_repository::ShipmentRepository;
pub use token_service::{IssuedToken, TokenClaims, TokenService};
pub use user_repository::UserRepository;
