//! EventPublisher port - Interface for publishing shipment change events.
//!
//! Publishing is fire-and-forget: delivery is best-effort, in-memory, with no
//! acknowledgement, retry or replay. A failed delivery must never fail the
//! mutation that produced the event, so the method has no error channel.

use crate::domain::shipment::ShipmentEvent;

/// Port for publishing shipment events.
///
/// # Example
///
/// ```ignore
/// let shipment = repo.insert(&new_shipment).await?;
/// publisher.publish(ShipmentEvent::Added(shipment.clone()));
/// ```
pub trait EventPublisher: Send + Sync {
    /// Deliver the event to every listener currently registered for its kind.
    fn publish(&self, event: ShipmentEvent);
}
