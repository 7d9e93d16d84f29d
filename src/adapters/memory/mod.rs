//! In-memory record store.
//!
//! Backs unit and integration tests, and the server when no database URL
//! is configured. Uniqueness checks and writes happen under one lock, so
//! concurrent inserts of the same key never both succeed.

mod shipment_repository;
mod user_repository;

pub use shipment_repository::InMemoryShipmentRepository;
pub use user_repository::InMemoryUserRepository;
