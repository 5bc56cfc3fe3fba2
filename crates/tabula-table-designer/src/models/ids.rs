//! Stable row identities
//!
//! Identity is minted when a row is created and never derived from its name,
//! so a renamed column is still recognised as the same column.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! row_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Mint a fresh identity for a row created in the designer
            pub fn generate() -> Self {
                Self(format!(concat!($prefix, "_{}"), uuid::Uuid::new_v4().simple()))
            }

            /// Deterministic identity for the n-th row of a fetched structure
            pub fn seeded(ordinal: usize) -> Self {
                Self(format!(concat!($prefix, "_{}"), ordinal))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

row_id!(
    /// Identity of a column row
    ColumnId,
    "col"
);
row_id!(
    /// Identity of an index row
    IndexId,
    "idx"
);
row_id!(
    /// Identity of a foreign key row
    ForeignKeyId,
    "fk"
);
