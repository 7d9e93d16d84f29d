//! Shipment repository port.
//!
//! Covers both the write side (insert, partial update, delete) and the
//! filtered listing used by the dashboard. Filter and sort arrive as closed
//! domain types, so adapters never interpret free-form input.

use crate::domain::foundation::{DomainError, ShipmentId};
use crate::domain::shipment::{
    NewShipment, PageRequest, Shipment, ShipmentFilter, ShipmentPatch, ShipmentSort,
};
use async_trait::async_trait;

/// Repository port for shipments.
#[async_trait]
pub trait ShipmentRepository: Send + Sync {
    /// Find a shipment by id.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &ShipmentId) -> Result<Option<Shipment>, DomainError>;

    /// Check whether a tracking number is already taken.
    async fn exists_by_tracking_number(&self, tracking_number: &str) -> Result<bool, DomainError>;

    /// One page of the filtered, sorted collection.
    async fn list(
        &self,
        filter: &ShipmentFilter,
        sort: &ShipmentSort,
        page: &PageRequest,
    ) -> Result<Vec<Shipment>, DomainError>;

    /// Size of the filtered collection.
    async fn count(&self, filter: &ShipmentFilter) -> Result<u64, DomainError>;

    /// Insert a new shipment and return the stored record.
    ///
    /// # Errors
    ///
    /// - `DuplicateTrackingNumber` on a unique violation
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, shipment: &NewShipment) -> Result<Shipment, DomainError>;

    /// Apply a partial update and return the post-update record.
    ///
    /// # Errors
    ///
    /// - `ShipmentNotFound` if the shipment doesn't exist
    /// - `DuplicateTrackingNumber` on a unique violation
    /// - `DatabaseError` on persistence failure
    async fn update(&self, id: &ShipmentId, patch: &ShipmentPatch)
        -> Result<Shipment, DomainError>;

    /// Delete a shipment.
    ///
    /// # Errors
    ///
    /// - `ShipmentNotFound` if the shipment doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn delete(&self, id: &ShipmentId) -> Result<(), DomainError>;
}
