//! Shipment records and their write-side value types.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{ShipmentId, Timestamp, ValidationError};

/// Largest weight a `NUMERIC(10,2)` column holds.
pub const MAX_WEIGHT: f64 = 99_999_999.99;

/// Lifecycle state of a shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipmentStatus {
    Pending,
    InTransit,
    Delivered,
    Cancelled,
}

impl ShipmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShipmentStatus::Pending => "PENDING",
            ShipmentStatus::InTransit => "IN_TRANSIT",
            ShipmentStatus::Delivered => "DELIVERED",
            ShipmentStatus::Cancelled => "CANCELLED",
        }
    }
}

impl Default for ShipmentStatus {
    fn default() -> Self {
        ShipmentStatus::Pending
    }
}

impl fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShipmentStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "PENDING" => Ok(ShipmentStatus::Pending),
            "IN_TRANSIT" => Ok(ShipmentStatus::InTransit),
            "DELIVERED" => Ok(ShipmentStatus::Delivered),
            "CANCELLED" => Ok(ShipmentStatus::Cancelled),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown status '{}'", other),
            )),
        }
    }
}

/// Converts a transport weight into the stored decimal.
///
/// Must be finite, non-negative and fit `NUMERIC(10,2)`; rounded to cents.
pub fn parse_weight(raw: f64) -> Result<Decimal, ValidationError> {
    if !raw.is_finite() {
        return Err(ValidationError::invalid_format("weight", "must be a finite number"));
    }
    if raw < 0.0 {
        return Err(ValidationError::invalid_format("weight", "must not be negative"));
    }
    if raw > MAX_WEIGHT {
        return Err(ValidationError::invalid_format(
            "weight",
            format!("must not exceed {}", MAX_WEIGHT),
        ));
    }

    Decimal::try_from(raw)
        .map(|d| d.round_dp(2))
        .map_err(|e| ValidationError::invalid_format("weight", e.to_string()))
}

/// Checks a required free-text field and returns it trimmed.
pub fn require_text(field: &str, raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(trimmed.to_string())
}

/// Stored shipment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shipment {
    pub id: ShipmentId,
    pub tracking_number: String,
    pub origin: String,
    pub destination: String,
    pub status: ShipmentStatus,
    pub carrier: String,
    pub weight: Decimal,
    pub dimensions: String,
    pub estimated_delivery: Timestamp,
    pub actual_delivery: Option<Timestamp>,
    pub customer_name: String,
    pub customer_email: String,
    /// Email of the account that created the record; never changes afterwards.
    pub creator_email: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Shipment {
    /// Weight as a float for transports, which carry it as a JSON number.
    pub fn weight_f64(&self) -> f64 {
        self.weight.to_f64().unwrap_or_default()
    }
}

/// Validated data for inserting a shipment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShipment {
    pub tracking_number: String,
    pub origin: String,
    pub destination: String,
    pub status: ShipmentStatus,
    pub carrier: String,
    pub weight: Decimal,
    pub dimensions: String,
    pub estimated_delivery: Timestamp,
    pub customer_name: String,
    pub customer_email: String,
    pub creator_email: Option<String>,
}

/// Partial update of a shipment; `None` leaves the column untouched.
///
/// There is no id or creator field: neither can be modified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShipmentPatch {
    pub tracking_number: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub status: Option<ShipmentStatus>,
    pub carrier: Option<String>,
    pub weight: Option<Decimal>,
    pub dimensions: Option<String>,
    pub estimated_delivery: Option<Timestamp>,
    pub actual_delivery: Option<Timestamp>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
}

impl ShipmentPatch {
    pub fn is_empty(&self) -> bool {
        *self == ShipmentPatch::default()
    }

    /// Applies the patch to an in-memory copy.
    pub fn apply_to(&self, shipment: &mut Shipment) {
        if let Some(v) = &self.tracking_number {
            shipment.tracking_number = v.clone();
        }
        if let Some(v) = &self.origin {
            shipment.origin = v.clone();
        }
        if let Some(v) = &self.destination {
            shipment.destination = v.clone();
        }
        if let Some(v) = self.status {
            shipment.status = v;
        }
        if let Some(v) = &self.carrier {
            shipment.carrier = v.clone();
        }
        if let Some(v) = self.weight {
            shipment.weight = v;
        }
        if let Some(v) = &self.dimensions {
            shipment.dimensions = v.clone();
        }
        if let Some(v) = self.estimated_delivery {
            shipment.estimated_delivery = v;
        }
        if let Some(v) = self.actual_delivery {
            shipment.actual_delivery = Some(v);
        }
        if let Some(v) = &self.customer_name {
            shipment.customer_name = v.clone();
        }
        if let Some(v) = &self.customer_email {
            shipment.customer_email = v.clone();
        }
    }
}
