//! Fact row types read from the data store.

use chrono::NaiveDate;
use finsight_shared::types::{
    AccountId, BudgetId, CategoryId, CostCenterId, DepartmentId, OrderId, TransactionId, VendorId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Error returned when a label does not name a known enum variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind}: {value}")]
pub struct UnknownVariant {
    /// Enum being parsed.
    pub kind: &'static str,
    /// Rejected input.
    pub value: String,
}

/// Macro to generate label-backed enums with `Display`/`FromStr`.
macro_rules! labelled_enum {
    ($(#[$meta:meta])* $name:ident, $kind:literal, { $($(#[$vmeta:meta])* $variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// All variants in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Display label as stored and rendered.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
                    .ok_or_else(|| UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

labelled_enum!(
    /// Direction of a ledger transaction.
    TransactionType, "transaction type", {
        /// Money coming in.
        Revenue => "Revenue",
        /// Money going out.
        Expense => "Expense",
    }
);

labelled_enum!(
    /// Lifecycle status of a transaction.
    TransactionStatus, "transaction status", {
        /// Awaiting approval.
        Pending => "Pending",
        /// Approved, not yet settled.
        Approved => "Approved",
        /// Rejected; excluded from KPIs.
        Rejected => "Rejected",
        /// Settled.
        Completed => "Completed",
    }
);

labelled_enum!(
    /// Chart of accounts classification.
    AccountType, "account type", {
        /// Asset account.
        Asset => "Asset",
        /// Liability account.
        Liability => "Liability",
        /// Equity account.
        Equity => "Equity",
        /// Revenue account.
        Revenue => "Revenue",
        /// Expense account.
        Expense => "Expense",
    }
);

labelled_enum!(
    /// Lifecycle status of a procurement order.
    OrderStatus, "order status", {
        /// Being prepared.
        Draft => "Draft",
        /// Submitted for approval.
        Submitted => "Submitted",
        /// Approved, not yet placed.
        Approved => "Approved",
        /// Rejected by an approver.
        Rejected => "Rejected",
        /// Placed with the vendor.
        Ordered => "Ordered",
        /// Goods received.
        Received => "Received",
        /// Fully closed.
        Closed => "Closed",
        /// Cancelled before fulfilment.
        Cancelled => "Cancelled",
    }
);

impl OrderStatus {
    /// Returns true if the order counts towards committed spend.
    #[must_use]
    pub const fn is_committed(self) -> bool {
        !matches!(self, Self::Draft | Self::Rejected | Self::Cancelled)
    }

    /// Returns true if the order is still waiting to be fulfilled.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Submitted | Self::Approved | Self::Ordered)
    }
}

labelled_enum!(
    /// Procurement order priority, ordered from lowest to highest.
    Priority, "priority", {
        /// Low priority.
        Low => "Low",
        /// Medium priority.
        Medium => "Medium",
        /// High priority.
        High => "High",
        /// Urgent.
        Urgent => "Urgent",
    }
);

/// A single transaction with its dimension labels resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionFact {
    /// Transaction ID.
    pub id: TransactionId,
    /// Transaction date.
    pub date: NaiveDate,
    /// Revenue or expense.
    pub transaction_type: TransactionType,
    /// Lifecycle status.
    pub status: TransactionStatus,
    /// Amount, always positive.
    pub amount: Decimal,
    /// Department ID.
    pub department_id: DepartmentId,
    /// Department name.
    pub department: String,
    /// Cost center ID.
    pub cost_center_id: CostCenterId,
    /// Cost center name.
    pub cost_center: String,
    /// Account ID.
    pub account_id: AccountId,
    /// Account name.
    pub account: String,
    /// Account classification.
    pub account_type: AccountType,
    /// Counterparty, if recorded.
    pub vendor_name: Option<String>,
    /// Payment method, if recorded.
    pub payment_method: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
}

/// A single procurement order with its dimension labels resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFact {
    /// Order ID.
    pub id: OrderId,
    /// Unique order number.
    pub order_number: String,
    /// Date the order was raised.
    pub order_date: NaiveDate,
    /// Department ID.
    pub department_id: DepartmentId,
    /// Department name.
    pub department: String,
    /// Vendor ID.
    pub vendor_id: VendorId,
    /// Vendor name.
    pub vendor: String,
    /// Category ID.
    pub category_id: CategoryId,
    /// Category name.
    pub category: String,
    /// Parent category name, `None` for top-level categories.
    pub parent_category: Option<String>,
    /// Cost center ID.
    pub cost_center_id: CostCenterId,
    /// Cost center name.
    pub cost_center: String,
    /// Amount before tax and shipping.
    pub subtotal: Decimal,
    /// Tax amount.
    pub tax_amount: Decimal,
    /// Shipping amount.
    pub shipping_amount: Decimal,
    /// Grand total.
    pub grand_total: Decimal,
    /// Lifecycle status.
    pub status: OrderStatus,
    /// Priority.
    pub priority: Priority,
    /// Promised delivery date.
    pub expected_delivery_date: Option<NaiveDate>,
    /// Actual delivery date.
    pub actual_delivery_date: Option<NaiveDate>,
}

impl OrderFact {
    /// Days between expected and actual delivery, when both are known.
    #[must_use]
    pub fn delay_days(&self) -> Option<i64> {
        match (self.expected_delivery_date, self.actual_delivery_date) {
            (Some(expected), Some(actual)) => Some((actual - expected).num_days()),
            _ => None,
        }
    }
}

/// Department master data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentFact {
    /// Department ID.
    pub id: DepartmentId,
    /// Department name.
    pub name: String,
    /// Short code.
    pub code: String,
    /// Manager name.
    pub manager: Option<String>,
    /// Allocated budget for the department.
    pub budget_allocation: Decimal,
}

/// A budget line with its dimension labels resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetFact {
    /// Budget ID.
    pub id: BudgetId,
    /// Department ID.
    pub department_id: DepartmentId,
    /// Department name.
    pub department: String,
    /// Cost center name.
    pub cost_center: String,
    /// Account name.
    pub account: String,
    /// Fiscal year.
    pub fiscal_year: i32,
    /// Budgeted amount.
    pub budget_amount: Decimal,
    /// Spent amount.
    pub spent_amount: Decimal,
    /// Workflow status as stored.
    pub status: String,
}

/// Vendor master data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorFact {
    /// Vendor ID.
    pub id: VendorId,
    /// Vendor name.
    pub name: String,
    /// Short code.
    pub code: String,
    /// Rating between 1.0 and 5.0.
    pub rating: Decimal,
    /// Credit limit.
    pub credit_limit: Decimal,
    /// Whether the vendor is active.
    pub is_active: bool,
}
