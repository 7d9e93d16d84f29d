//! DeleteUserHandler - admin-only removal of another account.

use std::sync::Arc;

use tracing::info;

use crate::application::OperationError;
use crate::domain::foundation::{authorize, Action, Principal, UserId};
use crate::ports::UserRepository;

pub struct DeleteUserHandler {
    users: Arc<dyn UserRepository>,
}

impl DeleteUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Self-deletion is denied before the store is consulted, so it can
    /// never surface as not-found.
    pub async fn handle(
        &self,
        principal: Option<&Principal>,
        id: UserId,
    ) -> Result<(), OperationError> {
        let actor = authorize(principal, &Action::DeleteUser { target: id })?;

        self.users.delete(&id).await.map_err(|e| match OperationError::from(e) {
            OperationError::NotFound { resource, .. } => OperationError::NotFound {
                resource,
                id: id.to_string(),
            },
            other => other,
        })?;

        info!(user_id = %id, deleted_by = %actor.id, "User deleted");
        Ok(())
    }
}
