//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, authorization guard)
//! - `user` - User accounts, identifier normalization, admin/scopes rule
//! - `shipment` - Shipment records, listing queries and change events

pub mod foundation;
pub mod shipment;
pub mod user;
