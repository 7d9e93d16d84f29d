//! AddShipmentHandler - creates a shipment and announces it.

use std::sync::Arc;

use tracing::info;

use crate::application::OperationError;
use crate::domain::foundation::{authorize, Action, ConflictField, Principal, Timestamp};
use crate::domain::shipment::{
    parse_weight, require_text, NewShipment, Shipment, ShipmentEvent, ShipmentStatus,
};
use crate::ports::{EventPublisher, ShipmentRepository, UserRepository};

/// Command to add a shipment, as delivered by a transport.
#[derive(Debug, Clone)]
pub struct AddShipmentCommand {
    pub tracking_number: String,
    pub origin: String,
    pub destination: String,
    /// Defaults to `PENDING`.
    pub status: Option<ShipmentStatus>,
    pub carrier: String,
    pub weight: f64,
    pub dimensions: String,
    /// RFC 3339 timestamp or `YYYY-MM-DD`.
    pub estimated_delivery: String,
    pub customer_name: String,
    pub customer_email: String,
}

impl AddShipmentCommand {
    fn into_new_shipment(self) -> Result<NewShipment, OperationError> {
        Ok(NewShipment {
            tracking_number: require_text("trackingNumber", &self.tracking_number)?,
            origin: require_text("origin", &self.origin)?,
            destination: require_text("destination", &self.destination)?,
            status: self.status.unwrap_or_default(),
            carrier: require_text("carrier", &self.carrier)?,
            weight: parse_weight(self.weight)?,
            dimensions: self.dimensions.trim().to_string(),
            estimated_delivery: Timestamp::parse("estimatedDelivery", &self.estimated_delivery)?,
            customer_name: require_text("customerName", &self.customer_name)?,
            customer_email: require_text("customerEmail", &self.customer_email)?,
            creator_email: None,
        })
    }
}

pub struct AddShipmentHandler {
    shipments: Arc<dyn ShipmentRepository>,
    users: Arc<dyn UserRepository>,
    publisher: Arc<dyn EventPublisher>,
}

impl AddShipmentHandler {
    pub fn new(
        shipments: Arc<dyn ShipmentRepository>,
        users: Arc<dyn UserRepository>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            shipments,
            users,
            publisher,
        }
    }

    pub async fn handle(
        &self,
        principal: Option<&Principal>,
        cmd: AddShipmentCommand,
    ) -> Result<Shipment, OperationError> {
        let actor = authorize(principal, &Action::CreateShipment)?;
        let mut new_shipment = cmd.into_new_shipment()?;

        // Fast path only; the unique constraint settles concurrent inserts.
        if self
            .shipments
            .exists_by_tracking_number(&new_shipment.tracking_number)
            .await?
        {
            return Err(OperationError::Conflict(ConflictField::TrackingNumber));
        }

        // The token carries no email, so read the current one.
        new_shipment.creator_email = self
            .users
            .find_by_id(&actor.id)
            .await?
            .map(|user| user.email);

        let shipment = self.shipments.insert(&new_shipment).await?;
        info!(
            shipment_id = %shipment.id,
            tracking_number = %shipment.tracking_number,
            created_by = %actor.id,
            "Shipment added"
        );

        self.publisher.publish(ShipmentEvent::Added(shipment.clone()));
        Ok(shipment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::Fixture;
    use crate::domain::shipment::ShipmentEventKind;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn command(tracking: &str) -> AddShipmentCommand {
        AddShipmentCommand {
            tracking_number: tracking.into(),
            origin: "Rotterdam".into(),
            destination: "Lyon".into(),
            status: Some(ShipmentStatus::Pending),
            carrier: "DHL".into(),
            weight: 2.5,
            dimensions: "30x20x10".into(),
            estimated_delivery: "2030-05-01".into(),
            customer_name: "Nora".into(),
            customer_email: "nora@example.com".into(),
        }
    }

    fn handler(fx: &Fixture) -> AddShipmentHandler {
        AddShipmentHandler::new(fx.shipments.clone(), fx.users.clone(), fx.publisher.clone())
    }

    #[tokio::test]
    async fn stores_stamps_creator_and_publishes() {
        let fx = Fixture::new();
        let me = fx.employee("otto").await;

        let shipment = handler(&fx).handle(Some(&me), command("TN1")).await.unwrap();

        assert_eq!(shipment.creator_email.as_deref(), Some("otto@example.com"));
        assert_eq!(shipment.weight, Decimal::from_str("2.50").unwrap());
        assert_eq!(shipment.status, ShipmentStatus::Pending);

        let events = fx.publisher.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind(), ShipmentEventKind::ShipmentAdded);
        assert_eq!(events[0], ShipmentEvent::Added(shipment));
    }

    #[tokio::test]
    async fn duplicate_tracking_number_conflicts_without_event() {
        let fx = Fixture::new();
        let me = fx.employee("pia").await;
        handler(&fx).handle(Some(&me), command("TN1")).await.unwrap();

        let err = handler(&fx)
            .handle(Some(&me), command("TN1"))
            .await
            .unwrap_err();

        assert_eq!(err, OperationError::Conflict(ConflictField::TrackingNumber));
        assert_eq!(err.to_string(), "Tracking number already exists");
        assert_eq!(fx.publisher.events().len(), 1);
    }

    #[tokio::test]
    async fn malformed_input_is_validation() {
        let fx = Fixture::new();
        let me = fx.employee("rex").await;

        let mut bad_date = command("TN2");
        bad_date.estimated_delivery = "soon".into();
        let mut bad_weight = command("TN3");
        bad_weight.weight = -1.0;
        let mut blank_origin = command("TN4");
        blank_origin.origin = "  ".into();

        for cmd in [bad_date, bad_weight, blank_origin] {
            let err = handler(&fx).handle(Some(&me), cmd).await.unwrap_err();
            assert!(matches!(err, OperationError::Validation { .. }), "{err:?}");
        }
        assert!(fx.publisher.events().is_empty());
    }

    #[tokio::test]
    async fn status_defaults_to_pending() {
        let fx = Fixture::new();
        let me = fx.employee("sue").await;
        let mut cmd = command("TN5");
        cmd.status = None;

        let shipment = handler(&fx).handle(Some(&me), cmd).await.unwrap();
        assert_eq!(shipment.status, ShipmentStatus::Pending);
    }

    #[tokio::test]
    async fn requires_authentication() {
        let fx = Fixture::new();
        let err = handler(&fx).handle(None, command("TN6")).await.unwrap_err();
        assert_eq!(err, OperationError::AuthenticationRequired);
    }
}
