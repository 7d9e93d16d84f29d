//! HTTP adapter - JSON REST API over axum.
//!
//! Each area has its own dto/handlers/routes module; all of them share one
//! `AppState` and one error mapping.

pub mod auth;
pub mod error;
pub mod middleware;
pub mod router;
pub mod shipments;
pub mod state;
pub mod users;

pub use error::{ApiError, ErrorResponse};
pub use router::build_router;
pub use state::AppState;
