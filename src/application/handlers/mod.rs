//! Application handlers.
//!
//! One handler per operation. Each takes the resolved principal (if any)
//! and a command, and returns a value or an `OperationError`.

pub mod auth;
pub mod shipment;
pub mod user;

pub use auth::{
    bearer_token, AuthPayload, ChangePasswordCommand, ChangePasswordHandler, LoginCommand,
    LoginHandler, PrincipalResolver, RegisterCommand, RegisterHandler,
};
pub use shipment::{
    AddShipmentCommand, AddShipmentHandler, DeleteShipmentHandler, GetShipmentHandler,
    ListShipmentsHandler, ListShipmentsQuery, UpdateShipmentCommand, UpdateShipmentHandler,
};
pub use user::{
    DeleteUserHandler, GetMeHandler, ListUsersHandler, UpdateUserCommand, UpdateUserHandler,
};
