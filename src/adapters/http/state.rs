//! Shared application state for the HTTP and WebSocket adapters.

use std::sync::Arc;

use crate::adapters::events::ShipmentBroadcaster;
use crate::application::handlers::{
    AddShipmentHandler, ChangePasswordHandler, DeleteShipmentHandler, DeleteUserHandler,
    GetMeHandler, GetShipmentHandler, ListShipmentsHandler, ListUsersHandler, LoginHandler,
    PrincipalResolver, RegisterHandler, UpdateShipmentHandler, UpdateUserHandler,
};
use crate::config::SubscriptionConfig;
use crate::ports::{
    CredentialHasher, EventPublisher, ShipmentRepository, TokenService, UserRepository,
};

/// Dependencies shared by every request.
///
/// Cloned per request; everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub shipments: Arc<dyn ShipmentRepository>,
    pub hasher: Arc<dyn CredentialHasher>,
    pub tokens: Arc<dyn TokenService>,
    pub broadcaster: ShipmentBroadcaster,
    pub resolver: Arc<PrincipalResolver>,
    pub subscriptions: SubscriptionConfig,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        shipments: Arc<dyn ShipmentRepository>,
        hasher: Arc<dyn CredentialHasher>,
        tokens: Arc<dyn TokenService>,
        broadcaster: ShipmentBroadcaster,
        subscriptions: SubscriptionConfig,
    ) -> Self {
        let resolver = Arc::new(PrincipalResolver::new(tokens.clone(), users.clone()));
        Self {
            users,
            shipments,
            hasher,
            tokens,
            broadcaster,
            resolver,
            subscriptions,
        }
    }

    fn publisher(&self) -> Arc<dyn EventPublisher> {
        Arc::new(self.broadcaster.clone())
    }

    // Auth

    pub fn login_handler(&self) -> LoginHandler {
        LoginHandler::new(self.users.clone(), self.hasher.clone(), self.tokens.clone())
    }

    pub fn register_handler(&self) -> RegisterHandler {
        RegisterHandler::new(self.users.clone(), self.hasher.clone(), self.tokens.clone())
    }

    pub fn change_password_handler(&self) -> ChangePasswordHandler {
        ChangePasswordHandler::new(self.users.clone(), self.hasher.clone())
    }

    // Users

    pub fn get_me_handler(&self) -> GetMeHandler {
        GetMeHandler::new(self.users.clone())
    }

    pub fn list_users_handler(&self) -> ListUsersHandler {
        ListUsersHandler::new(self.users.clone())
    }

    pub fn update_user_handler(&self) -> UpdateUserHandler {
        UpdateUserHandler::new(self.users.clone(), self.hasher.clone())
    }

    pub fn delete_user_handler(&self) -> DeleteUserHandler {
        DeleteUserHandler::new(self.users.clone())
    }

    // Shipments

    pub fn list_shipments_handler(&self) -> ListShipmentsHandler {
        ListShipmentsHandler::new(self.shipments.clone())
    }

    pub fn get_shipment_handler(&self) -> GetShipmentHandler {
        GetShipmentHandler::new(self.shipments.clone())
    }

    pub fn add_shipment_handler(&self) -> AddShipmentHandler {
        AddShipmentHandler::new(self.shipments.clone(), self.users.clone(), self.publisher())
    }

    pub fn update_shipment_handler(&self) -> UpdateShipmentHandler {
        UpdateShipmentHandler::new(self.shipments.clone(), self.publisher())
    }

    pub fn delete_shipment_handler(&self) -> DeleteShipmentHandler {
        DeleteShipmentHandler::new(self.shipments.clone(), self.publisher())
    }
}
