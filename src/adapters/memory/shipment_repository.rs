//! In-memory implementation of ShipmentRepository.

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::domain::foundation::{ConflictField, DomainError, ErrorCode, ShipmentId, Timestamp};
use crate::domain::shipment::{
    NewShipment, PageRequest, Shipment, ShipmentFilter, ShipmentPatch, ShipmentSort,
};
use crate::ports::ShipmentRepository;

#[derive(Default)]
struct State {
    next_id: i64,
    rows: BTreeMap<i64, Shipment>,
}

impl State {
    fn tracking_taken(&self, tracking_number: &str, excluding: Option<i64>) -> bool {
        self.rows
            .iter()
            .any(|(id, s)| Some(*id) != excluding && s.tracking_number == tracking_number)
    }
}

fn not_found(id: &ShipmentId) -> DomainError {
    DomainError::new(ErrorCode::ShipmentNotFound, "Shipment not found")
        .with_detail("id", id.to_string())
}

#[derive(Default)]
pub struct InMemoryShipmentRepository {
    state: RwLock<State>,
}

impl InMemoryShipmentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ShipmentRepository for InMemoryShipmentRepository {
    async fn find_by_id(&self, id: &ShipmentId) -> Result<Option<Shipment>, DomainError> {
        Ok(self.state.read().await.rows.get(&id.as_i64()).cloned())
    }

    async fn exists_by_tracking_number(&self, tracking_number: &str) -> Result<bool, DomainError> {
        Ok(self.state.read().await.tracking_taken(tracking_number, None))
    }

    async fn list(
        &self,
        filter: &ShipmentFilter,
        sort: &ShipmentSort,
        page: &PageRequest,
    ) -> Result<Vec<Shipment>, DomainError> {
        let state = self.state.read().await;
        let mut matching: Vec<&Shipment> =
            state.rows.values().filter(|s| filter.matches(s)).collect();
        matching.sort_by(|a, b| sort.compare(a, b));

        Ok(matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .cloned()
            .collect())
    }

    async fn count(&self, filter: &ShipmentFilter) -> Result<u64, DomainError> {
        let state = self.state.read().await;
        Ok(state.rows.values().filter(|s| filter.matches(s)).count() as u64)
    }

    async fn insert(&self, shipment: &NewShipment) -> Result<Shipment, DomainError> {
        let mut state = self.state.write().await;
        if state.tracking_taken(&shipment.tracking_number, None) {
            return Err(ConflictField::TrackingNumber.into());
        }

        state.next_id += 1;
        let now = Timestamp::now();
        let stored = Shipment {
            id: ShipmentId::new(state.next_id),
            tracking_number: shipment.tracking_number.clone(),
            origin: shipment.origin.clone(),
            destination: shipment.destination.clone(),
            status: shipment.status,
            carrier: shipment.carrier.clone(),
            weight: shipment.weight,
            dimensions: shipment.dimensions.clone(),
            estimated_delivery: shipment.estimated_delivery,
            actual_delivery: None,
            customer_name: shipment.customer_name.clone(),
            customer_email: shipment.customer_email.clone(),
            creator_email: shipment.creator_email.clone(),
            created_at: now,
            updated_at: now,
        };
        let next_id = state.next_id;
        state.rows.insert(next_id, stored.clone());
        Ok(stored)
    }

    async fn update(
        &self,
        id: &ShipmentId,
        patch: &ShipmentPatch,
    ) -> Result<Shipment, DomainError> {
        let mut state = self.state.write().await;
        if !state.rows.contains_key(&id.as_i64()) {
            return Err(not_found(id));
        }
        if let Some(tracking_number) = &patch.tracking_number {
            if state.tracking_taken(tracking_number, Some(id.as_i64())) {
                return Err(ConflictField::TrackingNumber.into());
            }
        }

        let shipment = state
            .rows
            .get_mut(&id.as_i64())
            .ok_or_else(|| not_found(id))?;
        patch.apply_to(shipment);
        shipment.updated_at = Timestamp::now();
        Ok(shipment.clone())
    }

    async fn delete(&self, id: &ShipmentId) -> Result<(), DomainError> {
        match self.state.write().await.rows.remove(&id.as_i64()) {
            Some(_) => Ok(()),
            None => Err(not_found(id)),
        }
    }
}
