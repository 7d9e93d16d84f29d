//! In-memory implementation of UserRepository.

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::domain::foundation::{ConflictField, DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::user::{NewUser, User, UserPatch};
use crate::ports::UserRepository;

#[derive(Default)]
struct State {
    next_id: i64,
    rows: BTreeMap<i64, User>,
}

impl State {
    fn conflict(
        &self,
        username: Option<&str>,
        email: Option<&str>,
        excluding: Option<&UserId>,
    ) -> Option<ConflictField> {
        let others = || {
            self.rows
                .values()
                .filter(move |u| Some(&u.id) != excluding)
        };
        if let Some(username) = username {
            if others().any(|u| u.username == username) {
                return Some(ConflictField::Username);
            }
        }
        if let Some(email) = email {
            if others().any(|u| u.email == email) {
                return Some(ConflictField::Email);
            }
        }
        None
    }
}

fn not_found(id: &UserId) -> DomainError {
    DomainError::new(ErrorCode::UserNotFound, "User not found").with_detail("id", id.to_string())
}

/// Users kept in a map ordered by id.
#[derive(Default)]
pub struct InMemoryUserRepository {
    state: RwLock<State>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops the stored credential, simulating a legacy row.
    pub async fn clear_credential(&self, id: &UserId) {
        if let Some(user) = self.state.write().await.rows.get_mut(&id.as_i64()) {
            user.credential_hash = None;
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.state.read().await.rows.get(&id.as_i64()).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let state = self.state.read().await;
        Ok(state.rows.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let state = self.state.read().await;
        Ok(state.rows.values().find(|u| u.email == email).cloned())
    }

    async fn find_identity_conflict(
        &self,
        username: Option<&str>,
        email: Option<&str>,
        excluding: Option<&UserId>,
    ) -> Result<Option<ConflictField>, DomainError> {
        Ok(self.state.read().await.conflict(username, email, excluding))
    }

    async fn list_all(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.state.read().await.rows.values().cloned().collect())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.state.read().await.rows.len() as u64)
    }

    async fn insert(&self, user: &NewUser) -> Result<User, DomainError> {
        let mut state = self.state.write().await;
        if let Some(field) = state.conflict(Some(&user.username), Some(&user.email), None) {
            return Err(field.into());
        }

        state.next_id += 1;
        let now = Timestamp::now();
        let stored = User {
            id: UserId::new(state.next_id),
            username: user.username.clone(),
            email: user.email.clone(),
            credential_hash: Some(user.credential_hash.clone()),
            role: user.role,
            scopes: user.scopes.clone(),
            created_at: now,
            updated_at: now,
        };
        let next_id = state.next_id;
        state.rows.insert(next_id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: &UserId, patch: &UserPatch) -> Result<User, DomainError> {
        let mut state = self.state.write().await;
        if !state.rows.contains_key(&id.as_i64()) {
            return Err(not_found(id));
        }
        if let Some(field) =
            state.conflict(patch.username.as_deref(), patch.email.as_deref(), Some(id))
        {
            return Err(field.into());
        }

        let user = state
            .rows
            .get_mut(&id.as_i64())
            .ok_or_else(|| not_found(id))?;
        if let Some(v) = &patch.username {
            user.username = v.clone();
        }
        if let Some(v) = &patch.email {
            user.email = v.clone();
        }
        if let Some(v) = &patch.credential_hash {
            user.credential_hash = Some(v.clone());
        }
        if let Some(v) = patch.role {
            user.role = v;
        }
        if let Some(v) = &patch.scopes {
            user.scopes = v.clone();
        }
        user.updated_at = Timestamp::now();
        Ok(user.clone())
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        match self.state.write().await.rows.remove(&id.as_i64()) {
            Some(_) => Ok(()),
            None => Err(not_found(id)),
        }
    }
}
