//! HTTP adapter for shipment endpoints.

pub mod dto;
mod handlers;
mod routes;

pub use dto::{
    CreateShipmentRequest, ListShipmentsParams, PageInfoResponse, ShipmentListResponse,
    ShipmentResponse, UpdateShipmentRequest,
};
pub use routes::shipment_routes;
