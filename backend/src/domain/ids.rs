//! Storage-assigned numeric identifiers.
//!
//! Identifiers are positive 64-bit integers allocated by the backing store.
//! On the wire they travel as decimal strings (`"42"`) so clients never have
//! to reason about integer precision.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors for identifier parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdValidationError {
    #[error("{kind} must not be empty")]
    Empty { kind: &'static str },
    #[error("{kind} must be a decimal integer")]
    NotNumeric { kind: &'static str },
    #[error("{kind} must be positive")]
    NotPositive { kind: &'static str },
}

macro_rules! define_numeric_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(i64);

        impl $name {
            /// Construct from a raw storage value, rejecting zero and negatives.
            pub fn new(value: i64) -> Result<Self, IdValidationError> {
                if value <= 0 {
                    return Err(IdValidationError::NotPositive { kind: $kind });
                }
                Ok(Self(value))
            }

            /// Parse the decimal string form used on the wire.
            pub fn parse(raw: &str) -> Result<Self, IdValidationError> {
                if raw.is_empty() {
                    return Err(IdValidationError::Empty { kind: $kind });
                }
                let value = raw
                    .parse::<i64>()
                    .map_err(|_| IdValidationError::NotNumeric { kind: $kind })?;
                Self::new(value)
            }

            /// Raw value as stored in the database.
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(&value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0.to_string()
            }
        }
    };
}

define_numeric_id!(
    /// Identifier of a registered user.
    UserId,
    "user id"
);

define_numeric_id!(
    /// Identifier of a catalogue book.
    BookId,
    "book id"
);

define_numeric_id!(
    /// Identifier of a placed order.
    ///
    /// Allocated monotonically by the store, so sorting by id approximates
    /// placement order.
    OrderId,
    "order id"
);
