//! Application layer - operation handlers.
//!
//! Orchestrates domain rules and ports. Every operation runs the
//! authorization guard first, then validates, then touches the store,
//! then publishes at most one event.

mod bootstrap;
mod credentials;
mod errors;
pub mod handlers;

#[cfg(test)]
pub(crate) mod test_support;

pub use bootstrap::{ensure_default_admin, DefaultAdmin};
pub use credentials::{prepare_credential, validate_new_secret, MIN_SECRET_LENGTH};
pub use errors::{LoginIdentifier, OperationError, Resource};
pub use handlers::*;
