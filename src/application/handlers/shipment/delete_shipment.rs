//! DeleteShipmentHandler - admin-only removal.

use std::sync::Arc;

use tracing::info;

use crate::application::OperationError;
use crate::domain::foundation::{authorize, Action, Principal, ShipmentId};
use crate::domain::shipment::ShipmentEvent;
use crate::ports::{EventPublisher, ShipmentRepository};

pub struct DeleteShipmentHandler {
    shipments: Arc<dyn ShipmentRepository>,
    publisher: Arc<dyn EventPublisher>,
}

impl DeleteShipmentHandler {
    pub fn new(shipments: Arc<dyn ShipmentRepository>, publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            shipments,
            publisher,
        }
    }

    pub async fn handle(
        &self,
        principal: Option<&Principal>,
        id: ShipmentId,
    ) -> Result<(), OperationError> {
        let actor = authorize(principal, &Action::DeleteShipment)?;

        self.shipments
            .delete(&id)
            .await
            .map_err(|e| match OperationError::from(e) {
                OperationError::NotFound { .. } => OperationError::shipment_not_found(&id),
                other => other,
            })?;

        info!(shipment_id = %id, deleted_by = %actor.id, "Shipment deleted");
        self.publisher.publish(ShipmentEvent::Deleted { id });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::shipment::test_helpers::new_shipment;
    use crate::application::test_support::Fixture;

    fn handler(fx: &Fixture) -> DeleteShipmentHandler {
        DeleteShipmentHandler::new(fx.shipments.clone(), fx.publisher.clone())
    }

    #[tokio::test]
    async fn admin_deletes_and_publishes_id() {
        let fx = Fixture::new();
        let admin = fx.admin().await;
        let stored = fx.shipments.insert(&new_shipment("TN-D1")).await.unwrap();

        handler(&fx).handle(Some(&admin), stored.id).await.unwrap();

        assert!(fx.shipments.find_by_id(&stored.id).await.unwrap().is_none());
        assert_eq!(
            fx.publisher.events(),
            vec![ShipmentEvent::Deleted { id: stored.id }]
        );
    }

    #[tokio::test]
    async fn employees_are_denied_and_nothing_changes() {
        let fx = Fixture::new();
        let me = fx.employee("zed").await;
        let stored = fx.shipments.insert(&new_shipment("TN-D2")).await.unwrap();

        let err = handler(&fx).handle(Some(&me), stored.id).await.unwrap_err();

        assert_eq!(
            err,
            OperationError::AuthorizationDenied("Admin access required".into())
        );
        assert!(fx.shipments.find_by_id(&stored.id).await.unwrap().is_some());
        assert!(fx.publisher.events().is_empty());
    }

    #[tokio::test]
    async fn missing_shipment_is_not_found() {
        let fx = Fixture::new();
        let admin = fx.admin().await;

        let err = handler(&fx)
            .handle(Some(&admin), ShipmentId::new(31))
            .await
            .unwrap_err();

        assert_eq!(err, OperationError::shipment_not_found(&ShipmentId::new(31)));
        assert!(fx.publisher.events().is_empty());
    }
}
