//! Parameter sets pushed down to the data source.

use finsight_shared::DateRange;
use finsight_shared::types::{CategoryId, CostCenterId, DepartmentId, VendorId};
use serde::{Deserialize, Serialize};

use super::types::{
    OrderFact, OrderStatus, Priority, TransactionFact, TransactionStatus, TransactionType,
};

/// Optional entity filters accepted by every row-level query.
///
/// Filters that do not apply to a fact kind are ignored for it: a
/// `priority` filter narrows orders but never transactions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FactFilter {
    /// Restrict to one department.
    pub department_id: Option<DepartmentId>,
    /// Restrict to one cost center.
    pub cost_center_id: Option<CostCenterId>,
    /// Restrict to one vendor (orders only).
    pub vendor_id: Option<VendorId>,
    /// Restrict to one category (orders only).
    pub category_id: Option<CategoryId>,
    /// Restrict to revenue or expense (transactions only).
    pub transaction_type: Option<TransactionType>,
    /// Restrict to one transaction status.
    pub transaction_status: Option<TransactionStatus>,
    /// Restrict to one order status.
    pub order_status: Option<OrderStatus>,
    /// Restrict to one priority (orders only).
    pub priority: Option<Priority>,
}

impl FactFilter {
    /// Filter narrowed to a single department.
    #[must_use]
    pub fn for_department(department_id: DepartmentId) -> Self {
        Self {
            department_id: Some(department_id),
            ..Self::default()
        }
    }

    /// Returns true if the transaction passes every transaction-relevant filter.
    #[must_use]
    pub fn matches_transaction(&self, tx: &TransactionFact) -> bool {
        self.department_id.is_none_or(|id| tx.department_id == id)
            && self.cost_center_id.is_none_or(|id| tx.cost_center_id == id)
            && self
                .transaction_type
                .is_none_or(|kind| tx.transaction_type == kind)
            && self
                .transaction_status
                .is_none_or(|status| tx.status == status)
    }

    /// Returns true if the order passes every order-relevant filter.
    #[must_use]
    pub fn matches_order(&self, order: &OrderFact) -> bool {
        self.department_id
            .is_none_or(|id| order.department_id == id)
            && self
                .cost_center_id
                .is_none_or(|id| order.cost_center_id == id)
            && self.vendor_id.is_none_or(|id| order.vendor_id == id)
            && self.category_id.is_none_or(|id| order.category_id == id)
            && self.order_status.is_none_or(|status| order.status == status)
            && self.priority.is_none_or(|priority| order.priority == priority)
    }
}

/// A date range plus filters, the argument tuple of a row-level query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FactQuery {
    /// Inclusive date range.
    pub range: DateRange,
    /// Entity filters.
    pub filter: FactFilter,
}

impl FactQuery {
    /// Creates a new fact query.
    #[must_use]
    pub const fn new(range: DateRange, filter: FactFilter) -> Self {
        Self { range, filter }
    }
}

/// Filters for budget line queries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BudgetQuery {
    /// Restrict to one fiscal year.
    pub fiscal_year: Option<i32>,
    /// Restrict to one department.
    pub department_id: Option<DepartmentId>,
}
