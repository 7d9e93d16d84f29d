//! Authorization guard.
//!
//! Every operation names the [`Action`] it performs and asks [`authorize`]
//! before touching the store. The guard is pure: it only looks at the
//! principal and the action, so handlers stay free of ad-hoc role checks.
//!
//! ```text
//! action                                  rule
//! ------------------------------------    ------------------------------
//! ReadShipments, ReadOwnProfile           any principal
//! CreateShipment, UpdateShipment          any principal
//! ChangeOwnPassword                       any principal
//! ListUsers, CreateUser, UpdateUser       ADMIN
//! DeleteShipment                          ADMIN
//! DeleteUser { target }                   ADMIN, target != principal.id
//! ```

use thiserror::Error;

use super::{DomainError, ErrorCode, Principal, UserId};

/// Operation kinds the guard knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ReadShipments,
    ReadOwnProfile,
    ChangeOwnPassword,
    CreateShipment,
    UpdateShipment,
    DeleteShipment,
    ListUsers,
    CreateUser,
    UpdateUser,
    DeleteUser { target: UserId },
}

impl Action {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Action::ReadShipments => "read_shipments",
            Action::ReadOwnProfile => "read_own_profile",
            Action::ChangeOwnPassword => "change_own_password",
            Action::CreateShipment => "create_shipment",
            Action::UpdateShipment => "update_shipment",
            Action::DeleteShipment => "delete_shipment",
            Action::ListUsers => "list_users",
            Action::CreateUser => "create_user",
            Action::UpdateUser => "update_user",
            Action::DeleteUser { .. } => "delete_user",
        }
    }

    fn requires_admin(&self) -> bool {
        matches!(
            self,
            Action::ListUsers
                | Action::CreateUser
                | Action::UpdateUser
                | Action::DeleteUser { .. }
                | Action::DeleteShipment
        )
    }
}

/// Why the guard said no.
///
/// The two variants are kept apart so transports can answer 401 vs 403.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Denial {
    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("{0}")]
    AuthorizationDenied(String),
}

impl From<Denial> for DomainError {
    fn from(denial: Denial) -> Self {
        match denial {
            Denial::AuthenticationRequired => {
                DomainError::new(ErrorCode::Unauthorized, denial.to_string())
            }
            Denial::AuthorizationDenied(reason) => DomainError::new(ErrorCode::Forbidden, reason),
        }
    }
}

/// Decides whether `principal` may perform `action`.
///
/// On success the principal is handed back so callers can keep using it
/// without re-checking for `None`.
pub fn authorize<'a>(
    principal: Option<&'a Principal>,
    action: &Action,
) -> Result<&'a Principal, Denial> {
    let principal = principal.ok_or(Denial::AuthenticationRequired)?;

    if action.requires_admin() && !principal.is_admin() {
        return Err(Denial::AuthorizationDenied("Admin access required".to_string()));
    }

    if let Action::DeleteUser { target } = action {
        if *target == principal.id {
            return Err(Denial::AuthorizationDenied(
                "Cannot delete your own account".to_string(),
            ));
        }
    }

    Ok(principal)
}
