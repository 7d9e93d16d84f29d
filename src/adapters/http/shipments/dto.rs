//! HTTP DTOs for shipment endpoints.
//!
//! The same response shapes are pushed to live subscribers.

use serde::{Deserialize, Serialize};

use crate::application::handlers::{
    AddShipmentCommand, ListShipmentsQuery, UpdateShipmentCommand,
};
use crate::domain::foundation::{ShipmentId, ValidationError};
use crate::domain::shipment::{
    PageInfo, PageRequest, Shipment, ShipmentFilter, ShipmentPage, ShipmentSort,
    ShipmentStatus, DEFAULT_LIMIT, DEFAULT_PAGE,
};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Query string of `GET /api/shipments`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListShipmentsParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<String>,
    pub carrier: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub search: Option<String>,
    pub sort_field: Option<String>,
    pub sort_order: Option<String>,
}

impl ListShipmentsParams {
    pub fn into_query(self) -> Result<ListShipmentsQuery, ValidationError> {
        let page = PageRequest::new(
            self.page.unwrap_or(i64::from(DEFAULT_PAGE)),
            self.limit.unwrap_or(i64::from(DEFAULT_LIMIT)),
        )?;

        let status = self
            .status
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse::<ShipmentStatus>)
            .transpose()?;

        let sort = ShipmentSort::parse(
            self.sort_field.as_deref().filter(|s| !s.trim().is_empty()),
            self.sort_order.as_deref().filter(|s| !s.trim().is_empty()),
        )?;

        Ok(ListShipmentsQuery {
            page,
            filter: ShipmentFilter {
                status,
                carrier: self.carrier,
                origin: self.origin,
                destination: self.destination,
                search: self.search,
            },
            sort,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShipmentRequest {
    pub tracking_number: String,
    pub origin: String,
    pub destination: String,
    #[serde(default)]
    pub status: Option<ShipmentStatus>,
    pub carrier: String,
    pub weight: f64,
    #[serde(default)]
    pub dimensions: String,
    pub estimated_delivery: String,
    pub customer_name: String,
    pub customer_email: String,
}

impl From<CreateShipmentRequest> for AddShipmentCommand {
    fn from(req: CreateShipmentRequest) -> Self {
        AddShipmentCommand {
            tracking_number: req.tracking_number,
            origin: req.origin,
            destination: req.destination,
            status: req.status,
            carrier: req.carrier,
            weight: req.weight,
            dimensions: req.dimensions,
            estimated_delivery: req.estimated_delivery,
            customer_name: req.customer_name,
            customer_email: req.customer_email,
        }
    }
}

/// Partial shipment update. Absent fields stay unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateShipmentRequest {
    pub tracking_number: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub status: Option<ShipmentStatus>,
    pub carrier: Option<String>,
    pub weight: Option<f64>,
    pub dimensions: Option<String>,
    pub estimated_delivery: Option<String>,
    pub actual_delivery: Option<String>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
}

impl UpdateShipmentRequest {
    pub fn into_command(self, id: ShipmentId) -> UpdateShipmentCommand {
        UpdateShipmentCommand {
            id,
            tracking_number: self.tracking_number,
            origin: self.origin,
            destination: self.destination,
            status: self.status,
            carrier: self.carrier,
            weight: self.weight,
            dimensions: self.dimensions,
            estimated_delivery: self.estimated_delivery,
            actual_delivery: self.actual_delivery,
            customer_name: self.customer_name,
            customer_email: self.customer_email,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentResponse {
    pub id: String,
    pub tracking_number: String,
    pub origin: String,
    pub destination: String,
    pub status: ShipmentStatus,
    pub carrier: String,
    pub weight: f64,
    pub dimensions: String,
    pub estimated_delivery: String,
    pub actual_delivery: Option<String>,
    pub customer_name: String,
    pub customer_email: String,
    pub creator_email: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Shipment> for ShipmentResponse {
    fn from(s: &Shipment) -> Self {
        Self {
            id: s.id.to_string(),
            tracking_number: s.tracking_number.clone(),
            origin: s.origin.clone(),
            destination: s.destination.clone(),
            status: s.status,
            carrier: s.carrier.clone(),
            weight: s.weight_f64(),
            dimensions: s.dimensions.clone(),
            estimated_delivery: s.estimated_delivery.to_iso_string(),
            actual_delivery: s.actual_delivery.map(|t| t.to_iso_string()),
            customer_name: s.customer_name.clone(),
            customer_email: s.customer_email.clone(),
            creator_email: s.creator_email.clone(),
            created_at: s.created_at.to_iso_string(),
            updated_at: s.updated_at.to_iso_string(),
        }
    }
}

impl From<Shipment> for ShipmentResponse {
    fn from(s: Shipment) -> Self {
        Self::from(&s)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfoResponse {
    pub current_page: u32,
    pub total_pages: u64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl From<PageInfo> for PageInfoResponse {
    fn from(info: PageInfo) -> Self {
        Self {
            current_page: info.current_page,
            total_pages: info.total_pages,
            has_next_page: info.has_next_page,
            has_previous_page: info.has_previous_page,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentListResponse {
    pub shipments: Vec<ShipmentResponse>,
    pub total_count: u64,
    pub page_info: PageInfoResponse,
}

impl From<ShipmentPage> for ShipmentListResponse {
    fn from(page: ShipmentPage) -> Self {
        Self {
            shipments: page.shipments.iter().map(ShipmentResponse::from).collect(),
            total_count: page.total_count,
            page_info: page.page_info.into(),
        }
    }
}
