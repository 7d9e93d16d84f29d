//! Fakes shared by the handler tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::adapters::memory::{InMemoryShipmentRepository, InMemoryUserRepository};
use crate::domain::foundation::{
    AuthError, ConflictField, DomainError, Principal, Role, Timestamp, UserId,
};
use crate::domain::shipment::ShipmentEvent;
use crate::domain::user::{NewUser, User, UserPatch};
use crate::ports::{
    CredentialHasher, EventPublisher, IssuedToken, TokenClaims, TokenService, UserRepository,
};

/// Reversible "hash" that keeps tests fast.
pub struct PlainHasher;

#[async_trait]
impl CredentialHasher for PlainHasher {
    async fn hash(&self, secret: &str) -> Result<String, DomainError> {
        Ok(format!("plain${}", secret.trim()))
    }

    async fn verify(&self, candidate: &str, stored_hash: &str) -> bool {
        let candidate = candidate.trim();
        let stored = stored_hash.trim();
        !candidate.is_empty() && stored.strip_prefix("plain$") == Some(candidate)
    }

    fn is_hashed(&self, value: &str) -> bool {
        value.starts_with("plain$")
    }
}

/// Tokens of the form `tok-<id>`.
pub struct StaticTokenService;

impl TokenService for StaticTokenService {
    fn issue(&self, principal: &Principal) -> Result<IssuedToken, AuthError> {
        Ok(IssuedToken {
            token: format!("tok-{}", principal.id),
            expires_at: Timestamp::now().plus_hours(7),
        })
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let id: UserId = token
            .strip_prefix("tok-")
            .and_then(|raw| raw.parse().ok())
            .ok_or(AuthError::InvalidToken)?;
        Ok(TokenClaims {
            user_id: id,
            username: String::new(),
            role: Role::Employee,
            issued_at: Timestamp::now(),
            expires_at: Timestamp::now().plus_hours(7),
        })
    }
}

/// User store whose every call fails, as during a database outage.
pub struct UnavailableUsers;

fn outage() -> DomainError {
    DomainError::database("connection refused")
}

#[async_trait]
impl UserRepository for UnavailableUsers {
    async fn find_by_id(&self, _id: &UserId) -> Result<Option<User>, DomainError> {
        Err(outage())
    }

    async fn find_by_username(&self, _username: &str) -> Result<Option<User>, DomainError> {
        Err(outage())
    }

    async fn find_by_email(&self, _email: &str) -> Result<Option<User>, DomainError> {
        Err(outage())
    }

    async fn find_identity_conflict(
        &self,
        _username: Option<&str>,
        _email: Option<&str>,
        _excluding: Option<&UserId>,
    ) -> Result<Option<ConflictField>, DomainError> {
        Err(outage())
    }

    async fn list_all(&self) -> Result<Vec<User>, DomainError> {
        Err(outage())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Err(outage())
    }

    async fn insert(&self, _user: &NewUser) -> Result<User, DomainError> {
        Err(outage())
    }

    async fn update(&self, _id: &UserId, _patch: &UserPatch) -> Result<User, DomainError> {
        Err(outage())
    }

    async fn delete(&self, _id: &UserId) -> Result<(), DomainError> {
        Err(outage())
    }
}

/// Captures published events.
#[derive(Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<ShipmentEvent>>,
}

impl RecordingPublisher {
    pub fn events(&self) -> Vec<ShipmentEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl EventPublisher for RecordingPublisher {
    fn publish(&self, event: ShipmentEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Wired-up fakes for one test.
pub struct Fixture {
    pub users: Arc<InMemoryUserRepository>,
    pub shipments: Arc<InMemoryShipmentRepository>,
    pub hasher: Arc<PlainHasher>,
    pub tokens: Arc<StaticTokenService>,
    pub publisher: Arc<RecordingPublisher>,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            shipments: Arc::new(InMemoryShipmentRepository::new()),
            hasher: Arc::new(PlainHasher),
            tokens: Arc::new(StaticTokenService),
            publisher: Arc::new(RecordingPublisher::default()),
        }
    }

    /// Stores a user whose secret is `password`.
    pub async fn seed_user(&self, username: &str, role: Role, password: &str) -> User {
        let new_user = NewUser::new(
            username,
            &format!("{}@example.com", username),
            format!("plain${}", password),
            role,
            Vec::new(),
        )
        .unwrap();
        self.users.insert(&new_user).await.unwrap()
    }

    pub async fn admin(&self) -> Principal {
        self.seed_user("admin", Role::Admin, "admin123")
            .await
            .principal()
    }

    pub async fn employee(&self, username: &str) -> Principal {
        self.seed_user(username, Role::Employee, "password1")
            .await
            .principal()
    }
}
