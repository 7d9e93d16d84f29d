//! Axum router for shipment endpoints.

use axum::routing::get;
use axum::Router;

use super::handlers::{
    create_shipment, delete_shipment, get_shipment, list_shipments, update_shipment,
};
use crate::adapters::http::state::AppState;

/// Shipment routes, mounted under `/api/shipments`.
///
/// # Routes
/// - `GET /` - Filtered, sorted, paginated listing
/// - `POST /` - Create a shipment
/// - `GET /:id` - Single shipment or `null`
/// - `PATCH /:id` - Partial update
/// - `DELETE /:id` - Remove a shipment (admin)
pub fn shipment_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_shipments).post(create_shipment))
        .route(
            "/:id",
            get(get_shipment)
                .patch(update_shipment)
                .delete(delete_shipment),
        )
}
