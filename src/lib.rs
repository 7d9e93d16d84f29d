//! Shipment Tracker - Logistics tracking backend
//!
//! Authenticated shipment and user operations over HTTP, with live shipment
//! change feeds pushed to WebSocket subscribers.
//!
//! - `domain` - Records, validation and the authorization guard
//! - `ports` - Store, token, hashing and publishing interfaces
//! - `application` - One handler per operation
//! - `adapters` - Postgres, in-memory, Argon2, JWT, axum and WebSocket
//! - `config` - Environment-driven settings

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
