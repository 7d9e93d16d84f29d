//! User domain module.
//!
//! Accounts that can sign in, together with the normalization and
//! admin/scopes rules applied on every write path.

mod user;

pub use user::{
    effective_scopes, is_valid_email, normalize_identifier, NewUser, User, UserPatch,
    UserProfile,
};
