//! In-process fan-out of shipment events.
//!
//! One broadcast channel per event kind. Publishing never blocks and never
//! fails the caller: with no subscribers the event is dropped, and a
//! subscriber that falls more than `capacity` events behind skips the
//! oldest ones.

use std::collections::HashMap;

use tokio::sync::broadcast;

use crate::domain::shipment::{ShipmentEvent, ShipmentEventKind};
use crate::ports::EventPublisher;

/// Default per-kind buffer.
pub const DEFAULT_CAPACITY: usize = 256;

/// Registry of live subscribers, keyed by event kind.
#[derive(Clone)]
pub struct ShipmentBroadcaster {
    channels: HashMap<ShipmentEventKind, broadcast::Sender<ShipmentEvent>>,
}

impl ShipmentBroadcaster {
    pub fn new(capacity: usize) -> Self {
        let channels = ShipmentEventKind::ALL
            .into_iter()
            .map(|kind| {
                let (tx, _) = broadcast::channel(capacity.max(1));
                (kind, tx)
            })
            .collect();
        Self { channels }
    }

    /// Registers a listener for `kind`. Dropping the subscription unregisters it.
    pub fn subscribe(&self, kind: ShipmentEventKind) -> ShipmentSubscription {
        let receiver = match self.channels.get(&kind) {
            Some(tx) => tx.subscribe(),
            None => broadcast::channel(1).1,
        };
        ShipmentSubscription { kind, receiver }
    }

    /// Number of live subscriptions for `kind`.
    pub fn subscriber_count(&self, kind: ShipmentEventKind) -> usize {
        self.channels
            .get(&kind)
            .map(broadcast::Sender::receiver_count)
            .unwrap_or(0)
    }
}

impl Default for ShipmentBroadcaster {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl EventPublisher for ShipmentBroadcaster {
    fn publish(&self, event: ShipmentEvent) {
        let kind = event.kind();
        let Some(tx) = self.channels.get(&kind) else {
            return;
        };
        match tx.send(event) {
            Ok(delivered) => {
                tracing::debug!(event = %kind, subscribers = delivered, "Shipment event published")
            }
            Err(_) => tracing::trace!(event = %kind, "No subscribers for shipment event"),
        }
    }
}

/// A live registration for one event kind.
pub struct ShipmentSubscription {
    kind: ShipmentEventKind,
    receiver: broadcast::Receiver<ShipmentEvent>,
}

impl ShipmentSubscription {
    pub fn kind(&self) -> ShipmentEventKind {
        self.kind
    }

    /// Next event, in publish order. `None` once the broadcaster is gone.
    pub async fn recv(&mut self) -> Option<ShipmentEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(event = %self.kind, skipped, "Subscriber lagged, events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
