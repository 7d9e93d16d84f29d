//! ListUsersHandler - admin-only listing of every account.

use std::sync::Arc;

use crate::application::OperationError;
use crate::domain::foundation::{authorize, Action, Principal};
use crate::domain::user::UserProfile;
use crate::ports::UserRepository;

pub struct ListUsersHandler {
    users: Arc<dyn UserRepository>,
}

impl ListUsersHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(
        &self,
        principal: Option<&Principal>,
    ) -> Result<Vec<UserProfile>, OperationError> {
        authorize(principal, &Action::ListUsers)?;
        let users = self.users.list_all().await?;
        Ok(users.iter().map(|u| u.profile()).collect())
    }
}
