//! GetMeHandler - the caller's own profile.

use std::sync::Arc;

use crate::application::OperationError;
use crate::domain::foundation::{authorize, Action, Principal};
use crate::domain::user::UserProfile;
use crate::ports::UserRepository;

/// Handler for the `me` query.
pub struct GetMeHandler {
    users: Arc<dyn UserRepository>,
}

impl GetMeHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Returns `None` if the account vanished after the token resolved.
    pub async fn handle(
        &self,
        principal: Option<&Principal>,
    ) -> Result<Option<UserProfile>, OperationError> {
        let actor = authorize(principal, &Action::ReadOwnProfile)?;
        Ok(self
            .users
            .find_by_id(&actor.id)
            .await?
            .map(|user| user.profile()))
    }
}
