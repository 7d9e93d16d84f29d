//! HTTP handlers for shipment endpoints.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::OptionalAuth;
use crate::adapters::http::state::AppState;
use crate::domain::foundation::ShipmentId;

use super::dto::{
    CreateShipmentRequest, ListShipmentsParams, ShipmentListResponse, ShipmentResponse,
    UpdateShipmentRequest,
};

fn parse_shipment_id(path: Result<Path<String>, PathRejection>) -> Result<ShipmentId, ApiError> {
    let Path(raw) = path?;
    Ok(raw.parse()?)
}

/// GET /api/shipments
pub async fn list_shipments(
    State(state): State<AppState>,
    auth: OptionalAuth,
    params: Result<Query<ListShipmentsParams>, QueryRejection>,
) -> Result<Json<ShipmentListResponse>, ApiError> {
    let Query(params) = params?;
    let query = params.into_query()?;
    let page = state
        .list_shipments_handler()
        .handle(auth.principal(), query)
        .await?;
    Ok(Json(page.into()))
}

/// GET /api/shipments/:id
///
/// Answers `null` for an unknown id.
pub async fn get_shipment(
    State(state): State<AppState>,
    auth: OptionalAuth,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Option<ShipmentResponse>>, ApiError> {
    let id = parse_shipment_id(path)?;
    let shipment = state
        .get_shipment_handler()
        .handle(auth.principal(), id)
        .await?;
    Ok(Json(shipment.map(ShipmentResponse::from)))
}

/// POST /api/shipments
pub async fn create_shipment(
    State(state): State<AppState>,
    auth: OptionalAuth,
    body: Result<Json<CreateShipmentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShipmentResponse>), ApiError> {
    let Json(request) = body?;
    let shipment = state
        .add_shipment_handler()
        .handle(auth.principal(), request.into())
        .await?;
    Ok((StatusCode::CREATED, Json(shipment.into())))
}

/// PATCH /api/shipments/:id
pub async fn update_shipment(
    State(state): State<AppState>,
    auth: OptionalAuth,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<UpdateShipmentRequest>, JsonRejection>,
) -> Result<Json<ShipmentResponse>, ApiError> {
    let id = parse_shipment_id(path)?;
    let Json(request) = body?;
    let shipment = state
        .update_shipment_handler()
        .handle(auth.principal(), request.into_command(id))
        .await?;
    Ok(Json(shipment.into()))
}

/// DELETE /api/shipments/:id (admin)
pub async fn delete_shipment(
    State(state): State<AppState>,
    auth: OptionalAuth,
    path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = parse_shipment_id(path)?;
    state
        .delete_shipment_handler()
        .handle(auth.principal(), id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
