//! Strongly-typed identifier value objects.
//!
//! Both entity collections use store-assigned sequential keys. The transport
//! carries them as strings, so each id parses from and displays as decimal text.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw store key.
            pub fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw store key.
            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(ValidationError::empty_field($field));
                }
                trimmed
                    .parse::<i64>()
                    .ok()
                    .filter(|v| *v > 0)
                    .map(Self)
                    .ok_or_else(|| {
                        ValidationError::invalid_format($field, "must be a positive integer")
                    })
            }
        }
    };
}

numeric_id!(
    /// Identifier of a stored user account.
    UserId,
    "user_id"
);

numeric_id!(
    /// Identifier of a stored shipment.
    ShipmentId,
    "shipment_id"
);
