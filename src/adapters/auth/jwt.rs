//! HS256 token service.
//!
//! Tokens carry `{sub, username, role, iat, exp}` and are signed with a
//! shared secret. Expiry is checked with zero leeway.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, Principal, Role, Timestamp, UserId};
use crate::ports::{IssuedToken, TokenClaims, TokenService};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    username: String,
    role: Role,
    iat: i64,
    exp: i64,
}

/// Signs and verifies bearer tokens with a shared HMAC secret.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_hours: i64,
}

impl JwtTokenService {
    pub fn new(secret: &SecretString, ttl_hours: i64) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(bytes),
            decoding_key: DecodingKey::from_secret(bytes),
            validation,
            ttl_hours,
        }
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, principal: &Principal) -> Result<IssuedToken, AuthError> {
        let issued_at = Timestamp::now();
        let expires_at = issued_at.plus_hours(self.ttl_hours);
        let claims = Claims {
            sub: principal.id.to_string(),
            username: principal.username.clone(),
            role: principal.role,
            iat: issued_at.as_unix_secs(),
            exp: expires_at.as_unix_secs(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::SigningFailed(e.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                _ => {
                    tracing::debug!("Token validation failed: {}", e);
                    AuthError::InvalidToken
                }
            }
        })?;
        let claims = data.claims;

        let user_id: UserId = claims.sub.parse().map_err(|_| {
            tracing::warn!("Invalid subject in token: {}", claims.sub);
            AuthError::InvalidToken
        })?;

        Ok(TokenClaims {
            user_id,
            username: claims.username,
            role: claims.role,
            issued_at: Timestamp::from_unix_secs(claims.iat),
            expires_at: Timestamp::from_unix_secs(claims.exp),
        })
    }
}

impl std::fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("ttl_hours", &self.ttl_hours)
            .finish_non_exhaustive()
    }
}
