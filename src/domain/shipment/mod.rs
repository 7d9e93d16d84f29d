//! Shipment domain module.
//!
//! # Events
//!
//! - `ShipmentEvent::Added` - Published after a shipment is inserted
//! - `ShipmentEvent::Updated` - Published with the post-update record
//! - `ShipmentEvent::Deleted` - Published with the id of the removed record

mod events;
mod query;
mod shipment;

pub use events::{ShipmentEvent, ShipmentEventKind};
pub use query::{
    PageInfo, PageRequest, ShipmentFilter, ShipmentPage, ShipmentSort, SortDirection, SortField,
    DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT,
};
pub use shipment::{
    parse_weight, require_text, NewShipment, Shipment, ShipmentPatch, ShipmentStatus, MAX_WEIGHT,
};
