//! Typed entity identifiers.
//!
//! # Responsibility
//! - Give every entity kind its own id type so board/list/card ids cannot be
//!   swapped by accident in store signatures.
//!
//! # Invariants
//! - Ids are generated once by the store and never reused.
//! - Display/parse round-trips through the canonical UUID string.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a fresh random id.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wraps an existing UUID, e.g. one read back from a UI layer.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(value.trim()).map(Self)
            }
        }
    };
}

entity_id!(
    /// Stable identifier of a project.
    ProjectId
);
entity_id!(
    /// Stable identifier of a board within its project.
    BoardId
);
entity_id!(
    /// Stable identifier of a list within its board.
    ListId
);
entity_id!(
    /// Stable identifier of a card. Survives moves between lists.
    CardId
);
entity_id!(
    /// Stable identifier of a notification.
    NotificationId
);
