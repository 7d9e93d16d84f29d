//! WebSocket message types for live shipment subscriptions.
//!
//! Every frame is a JSON text message tagged by `type`:
//! - Client → Server: `connection_init`, `subscribe`, `unsubscribe`, `ping`
//! - Server → Client: `connection_ack`, `next`, `error`, `complete`, `pong`

use serde::{Deserialize, Serialize};

use crate::adapters::http::shipments::ShipmentResponse;
use crate::domain::shipment::ShipmentEvent;

// ============================================
// Client → Server Messages
// ============================================

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// First frame of every connection; carries the credentials.
    ConnectionInit {
        #[serde(default)]
        payload: InitPayload,
    },

    /// Start forwarding one event kind under a client-chosen id.
    Subscribe { id: String, event: String },

    /// Stop the subscription registered under `id`.
    Unsubscribe { id: String },

    /// Heartbeat request.
    Ping,
}

/// Credentials offered in `connection_init`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InitPayload {
    /// `Bearer <token>`, as in the HTTP header.
    #[serde(default)]
    pub authorization: Option<String>,
    /// Bare token.
    #[serde(default)]
    pub token: Option<String>,
}

impl InitPayload {
    /// The header-style value wins over the bare token.
    pub fn credential(&self) -> Option<&str> {
        self.authorization
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .or(self.token.as_deref())
    }
}

// ============================================
// Server → Client Messages
// ============================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Handshake accepted.
    ConnectionAck,

    /// One delivered event for subscription `id`.
    Next {
        id: String,
        payload: serde_json::Value,
    },

    /// Failure; `id` names the subscription when there is one.
    Error {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        message: String,
    },

    /// Subscription `id` is finished.
    Complete { id: String },

    /// Heartbeat response.
    Pong,
}

impl ServerMessage {
    pub fn error(id: Option<&str>, message: impl Into<String>) -> Self {
        ServerMessage::Error {
            id: id.map(str::to_owned),
            message: message.into(),
        }
    }

    /// Wraps an event for subscription `id`.
    pub fn next(id: &str, event: &ShipmentEvent) -> Self {
        ServerMessage::Next {
            id: id.to_owned(),
            payload: event_payload(event),
        }
    }
}

/// Formatted shipment for additions and updates, `{ id }` for deletions.
pub fn event_payload(event: &ShipmentEvent) -> serde_json::Value {
    match event {
        ShipmentEvent::Added(shipment) | ShipmentEvent::Updated(shipment) => {
            serde_json::to_value(ShipmentResponse::from(shipment))
                .unwrap_or(serde_json::Value::Null)
        }
        ShipmentEvent::Deleted { id } => serde_json::json!({ "id": id.to_string() }),
    }
}
