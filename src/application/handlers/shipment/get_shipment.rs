//! GetShipmentHandler - single shipment lookup.

use std::sync::Arc;

use crate::application::OperationError;
use crate::domain::foundation::{authorize, Action, Principal, ShipmentId};
use crate::domain::shipment::Shipment;
use crate::ports::ShipmentRepository;

pub struct GetShipmentHandler {
    shipments: Arc<dyn ShipmentRepository>,
}

impl GetShipmentHandler {
    pub fn new(shipments: Arc<dyn ShipmentRepository>) -> Self {
        Self { shipments }
    }

    /// A missing id is `Ok(None)`, not an error.
    pub async fn handle(
        &self,
        principal: Option<&Principal>,
        id: ShipmentId,
    ) -> Result<Option<Shipment>, OperationError> {
        authorize(principal, &Action::ReadShipments)?;
        Ok(self.shipments.find_by_id(&id).await?)
    }
}
