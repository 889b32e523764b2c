//! String-backed enumerations stored in the reporting tables.
//!
//! Each enum mirrors the analytics type of the same name in
//! `finsight_core::facts` and converts to and from it.

use finsight_core::facts;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

macro_rules! stored_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
        )]
        #[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
        pub enum $name {
            $(
                #[allow(missing_docs)]
                #[sea_orm(string_value = $label)]
                $variant,
            )+
        }

        impl From<$name> for facts::$name {
            fn from(value: $name) -> Self {
                match value {
                    $($name::$variant => Self::$variant,)+
                }
            }
        }

        impl From<facts::$name> for $name {
            fn from(value: facts::$name) -> Self {
                match value {
                    $(facts::$name::$variant => Self::$variant,)+
                }
            }
        }
    };
}

stored_enum!(
    /// Direction of a transaction.
    TransactionType {
        Revenue => "Revenue",
        Expense => "Expense",
    }
);

stored_enum!(
    /// Transaction lifecycle status.
    TransactionStatus {
        Pending => "Pending",
        Approved => "Approved",
        Rejected => "Rejected",
        Completed => "Completed",
    }
);

stored_enum!(
    /// Chart of accounts classification.
    AccountType {
        Asset => "Asset",
        Liability => "Liability",
        Equity => "Equity",
        Revenue => "Revenue",
        Expense => "Expense",
    }
);

stored_enum!(
    /// Procurement order lifecycle status.
    OrderStatus {
        Draft => "Draft",
        Submitted => "Submitted",
        Approved => "Approved",
        Rejected => "Rejected",
        Ordered => "Ordered",
        Received => "Received",
        Closed => "Closed",
        Cancelled => "Cancelled",
    }
);

stored_enum!(
    /// Procurement order priority.
    Priority {
        Low => "Low",
        Medium => "Medium",
        High => "High",
        Urgent => "Urgent",
    }
);

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveEnum;

    #[test]
    fn test_stored_values_match_display_labels() {
        for status in facts::OrderStatus::ALL {
            assert_eq!(OrderStatus::from(*status).to_value(), status.as_str());
        }
        for priority in facts::Priority::ALL {
            assert_eq!(Priority::from(*priority).to_value(), priority.as_str());
        }
    }

    #[test]
    fn test_conversion_is_lossless() {
        for kind in facts::TransactionType::ALL {
            assert_eq!(facts::TransactionType::from(TransactionType::from(*kind)), *kind);
        }
        for status in facts::TransactionStatus::ALL {
            assert_eq!(
                facts::TransactionStatus::from(TransactionStatus::from(*status)),
                *status
            );
        }
        for kind in facts::AccountType::ALL {
            assert_eq!(facts::AccountType::from(AccountType::from(*kind)), *kind);
        }
    }
}
