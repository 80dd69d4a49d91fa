//! Opaque record identifiers.
//!
//! # Invariants
//! - Ids are compared as plain strings; no format is assumed on read.
//! - Freshly generated ids are hyphenated uuid v4 strings.
//! - The wire form is the bare string (`"id": "1"` and uuid strings both load).

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generates a new random id.
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

opaque_id!(
    /// Stable identifier for a calendar event.
    EventId
);
opaque_id!(
    /// Stable identifier for a task.
    TaskId
);
opaque_id!(
    /// Stable identifier for a day-pool entry.
    DayPoolItemId
);
