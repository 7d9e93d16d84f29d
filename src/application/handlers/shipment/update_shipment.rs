//! UpdateShipmentHandler - partial update of a shipment.

use std::sync::Arc;

use tracing::info;

use crate::application::OperationError;
use crate::domain::foundation::{authorize, Action, Principal, ShipmentId, Timestamp};
use crate::domain::shipment::{
    parse_weight, require_text, Shipment, ShipmentEvent, ShipmentPatch, ShipmentStatus,
};
use crate::ports::{EventPublisher, ShipmentRepository};

/// Command to update a shipment; `None` fields are left unchanged.
#[derive(Debug, Clone)]
pub struct UpdateShipmentCommand {
    pub id: ShipmentId,
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

impl UpdateShipmentCommand {
    /// A command that changes nothing on `id`.
    pub fn new(id: ShipmentId) -> Self {
        Self {
            id,
            tracking_number: None,
            origin: None,
            destination: None,
            status: None,
            carrier: None,
            weight: None,
            dimensions: None,
            estimated_delivery: None,
            actual_delivery: None,
            customer_name: None,
            customer_email: None,
        }
    }

    fn to_patch(&self) -> Result<ShipmentPatch, OperationError> {
        fn text(field: &str, v: &Option<String>) -> Result<Option<String>, OperationError> {
            Ok(v.as_deref().map(|raw| require_text(field, raw)).transpose()?)
        }
        fn date(field: &str, v: &Option<String>) -> Result<Option<Timestamp>, OperationError> {
            Ok(v.as_deref().map(|raw| Timestamp::parse(field, raw)).transpose()?)
        }

        Ok(ShipmentPatch {
            tracking_number: text("trackingNumber", &self.tracking_number)?,
            origin: text("origin", &self.origin)?,
            destination: text("destination", &self.destination)?,
            status: self.status,
            carrier: text("carrier", &self.carrier)?,
            weight: self.weight.map(parse_weight).transpose()?,
            dimensions: self.dimensions.as_deref().map(|d| d.trim().to_string()),
            estimated_delivery: date("estimatedDelivery", &self.estimated_delivery)?,
            actual_delivery: date("actualDelivery", &self.actual_delivery)?,
            customer_name: text("customerName", &self.customer_name)?,
            customer_email: text("customerEmail", &self.customer_email)?,
        })
    }
}

pub struct UpdateShipmentHandler {
    shipments: Arc<dyn ShipmentRepository>,
    publisher: Arc<dyn EventPublisher>,
}

impl UpdateShipmentHandler {
    pub fn new(shipments: Arc<dyn ShipmentRepository>, publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            shipments,
            publisher,
        }
    }

    pub async fn handle(
        &self,
        principal: Option<&Principal>,
        cmd: UpdateShipmentCommand,
    ) -> Result<Shipment, OperationError> {
        let actor = authorize(principal, &Action::UpdateShipment)?;
        let patch = cmd.to_patch()?;

        // Nothing to write: report the current state, announce nothing.
        if patch.is_empty() {
            return self
                .shipments
                .find_by_id(&cmd.id)
                .await?
                .ok_or_else(|| OperationError::shipment_not_found(&cmd.id));
        }

        let shipment = self
            .shipments
            .update(&cmd.id, &patch)
            .await
            .map_err(|e| match OperationError::from(e) {
                OperationError::NotFound { .. } => OperationError::shipment_not_found(&cmd.id),
                other => other,
            })?;

        info!(shipment_id = %shipment.id, updated_by = %actor.id, "Shipment updated");
        self.publisher
            .publish(ShipmentEvent::Updated(shipment.clone()));
        Ok(shipment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::shipment::test_helpers::new_shipment;
    use crate::application::test_support::Fixture;
    use crate::domain::foundation::ConflictField;
    use crate::ports::ShipmentRepository;
    use chrono::Timelike;

    fn handler(fx: &Fixture) -> UpdateShipmentHandler {
        UpdateShipmentHandler::new(fx.shipments.clone(), fx.publisher.clone())
    }

    #[tokio::test]
    async fn only_supplied_fields_change() {
        let fx = Fixture::new();
        let me = fx.employee("tom").await;
        let stored = fx.shipments.insert(&new_shipment("TN-U1")).await.unwrap();

        let updated = handler(&fx)
            .handle(
                Some(&me),
                UpdateShipmentCommand {
                    status: Some(ShipmentStatus::Delivered),
                    actual_delivery: Some("2031-01-02T15:30:00Z".into()),
                    ..UpdateShipmentCommand::new(stored.id)
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.status, ShipmentStatus::Delivered);
        assert_eq!(
            updated.actual_delivery.map(|t| t.as_datetime().hour()),
            Some(15)
        );
        assert_eq!(updated.origin, stored.origin);
        assert_eq!(updated.tracking_number, "TN-U1");
        assert_eq!(updated.creator_email, stored.creator_email);

        assert_eq!(
            fx.publisher.events(),
            vec![ShipmentEvent::Updated(updated.clone())]
        );
    }

    #[tokio::test]
    async fn missing_id_is_not_found_and_silent() {
        let fx = Fixture::new();
        let me = fx.employee("uli").await;

        let err = handler(&fx)
            .handle(
                Some(&me),
                UpdateShipmentCommand {
                    carrier: Some("UPS".into()),
                    ..UpdateShipmentCommand::new(ShipmentId::new(404))
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err, OperationError::shipment_not_found(&ShipmentId::new(404)));
        assert!(fx.publisher.events().is_empty());
    }

    #[tokio::test]
    async fn empty_update_of_missing_id_is_still_not_found() {
        let fx = Fixture::new();
        let me = fx.employee("val").await;

        let err = handler(&fx)
            .handle(Some(&me), UpdateShipmentCommand::new(ShipmentId::new(5)))
            .await
            .unwrap_err();
        assert!(matches!(err, OperationError::NotFound { .. }));
    }

    #[tokio::test]
    async fn bad_date_is_rejected_before_writing() {
        let fx = Fixture::new();
        let me = fx.employee("wes").await;
        let stored = fx.shipments.insert(&new_shipment("TN-U2")).await.unwrap();

        let err = handler(&fx)
            .handle(
                Some(&me),
                UpdateShipmentCommand {
                    estimated_delivery: Some("31/12/2030".into()),
                    ..UpdateShipmentCommand::new(stored.id)
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, OperationError::Validation { .. }));
        let unchanged = fx.shipments.find_by_id(&stored.id).await.unwrap().unwrap();
        assert_eq!(unchanged, stored);
    }

    #[tokio::test]
    async fn retagging_onto_existing_tracking_number_conflicts() {
        let fx = Fixture::new();
        let me = fx.employee("xia").await;
        fx.shipments.insert(&new_shipment("TN-A")).await.unwrap();
        let b = fx.shipments.insert(&new_shipment("TN-B")).await.unwrap();

        let err = handler(&fx)
            .handle(
                Some(&me),
                UpdateShipmentCommand {
                    tracking_number: Some("TN-A".into()),
                    ..UpdateShipmentCommand::new(b.id)
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err, OperationError::Conflict(ConflictField::TrackingNumber));
    }

    #[tokio::test]
    async fn employees_may_update() {
        let fx = Fixture::new();
        let me = fx.employee("yan").await;
        let stored = fx.shipments.insert(&new_shipment("TN-U3")).await.unwrap();

        let updated = handler(&fx)
            .handle(
                Some(&me),
                UpdateShipmentCommand {
                    weight: Some(7.125),
                    ..UpdateShipmentCommand::new(stored.id)
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.weight_f64(), 7.12);
    }
}
