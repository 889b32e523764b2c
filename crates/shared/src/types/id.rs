//! Typed IDs for type-safe entity references.
//!
//! Typed IDs keep a `VendorId` from being passed where a `DepartmentId` filter is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(DepartmentId, "Unique identifier for a department.");
typed_id!(CostCenterId, "Unique identifier for a cost center.");
typed_id!(AccountId, "Unique identifier for a chart of accounts entry.");
typed_id!(BudgetId, "Unique identifier for a budget line.");
typed_id!(TransactionId, "Unique identifier for a transaction.");
typed_id!(VendorId, "Unique identifier for a vendor.");
typed_id!(CategoryId, "Unique identifier for a procurement category.");
typed_id!(OrderId, "Unique identifier for a procurement order.");
