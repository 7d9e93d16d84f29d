//! WebSocket adapter for live shipment subscriptions.
//!
//! A `type`-tagged JSON protocol over `GET /api/subscriptions`. The client
//! authenticates in `connection_init`, then opens any number of
//! subscriptions, each bound to one shipment event kind.

mod connection;
mod handler;
mod messages;

pub use connection::{Connection, Flow};
pub use handler::subscriptions_handler;
pub use messages::{event_payload, ClientMessage, InitPayload, ServerMessage};
