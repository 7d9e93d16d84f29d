//! Event adapters.
//!
//! - `ShipmentBroadcaster` - in-process publish/subscribe for shipment changes

mod broadcaster;

pub use broadcaster::{ShipmentBroadcaster, ShipmentSubscription, DEFAULT_CAPACITY};
