//! Shipment change events fanned out to live subscribers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Shipment;
use crate::domain::foundation::{ShipmentId, ValidationError};

/// Subscription topics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShipmentEventKind {
    ShipmentAdded,
    ShipmentUpdated,
    ShipmentDeleted,
}

impl ShipmentEventKind {
    pub const ALL: [ShipmentEventKind; 3] = [
        ShipmentEventKind::ShipmentAdded,
        ShipmentEventKind::ShipmentUpdated,
        ShipmentEventKind::ShipmentDeleted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShipmentEventKind::ShipmentAdded => "shipmentAdded",
            ShipmentEventKind::ShipmentUpdated => "shipmentUpdated",
            ShipmentEventKind::ShipmentDeleted => "shipmentDeleted",
        }
    }
}

impl fmt::Display for ShipmentEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShipmentEventKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                ValidationError::invalid_format("event", format!("unknown event '{}'", s))
            })
    }
}

/// A committed shipment change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShipmentEvent {
    Added(Shipment),
    Updated(Shipment),
    Deleted { id: ShipmentId },
}

impl ShipmentEvent {
    pub fn kind(&self) -> ShipmentEventKind {
        match self {
            ShipmentEvent::Added(_) => ShipmentEventKind::ShipmentAdded,
            ShipmentEvent::Updated(_) => ShipmentEventKind::ShipmentUpdated,
            ShipmentEvent::Deleted { .. } => ShipmentEventKind::ShipmentDeleted,
        }
    }

    pub fn shipment_id(&self) -> ShipmentId {
        match self {
            ShipmentEvent::Added(s) | ShipmentEvent::Updated(s) => s.id,
            ShipmentEvent::Deleted { id } => *id,
        }
    }
}
