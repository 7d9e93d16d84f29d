//! Shipment handlers.

mod add_shipment;
mod delete_shipment;
mod get_shipment;
mod list_shipments;
mod update_shipment;

pub use add_shipment::{AddShipmentCommand, AddShipmentHandler};
pub use delete_shipment::DeleteShipmentHandler;
pub use get_shipment::GetShipmentHandler;
pub use list_shipments::{ListShipmentsHandler, ListShipmentsQuery};
pub use update_shipment::{UpdateShipmentCommand, UpdateShipmentHandler};
