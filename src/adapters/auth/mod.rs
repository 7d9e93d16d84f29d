//! Authentication adapters.
//!
//! - `argon2_hasher` - Argon2id implementation of `CredentialHasher`
//! - `jwt` - HS256 implementation of `TokenService`

mod argon2_hasher;
mod jwt;

pub use argon2_hasher::Argon2CredentialHasher;
pub use jwt::JwtTokenService;
