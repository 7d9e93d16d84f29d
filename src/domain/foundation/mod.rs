//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, error types and the authorization
//! guard that form the vocabulary of the shipment tracking domain.

mod auth;
mod authorization;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, Principal, Role};
pub use authorization::{authorize, Action, Denial};
pub use errors::{ConflictField, DomainError, ErrorCode, ValidationError};
pub use ids::{ShipmentId, UserId};
pub use timestamp::Timestamp;
