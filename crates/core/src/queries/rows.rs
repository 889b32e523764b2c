//! Result rows of the named queries. Field names are the column names.

use chrono::NaiveDate;
use finsight_shared::types::{BudgetId, DepartmentId, OrderId, TransactionId, VendorId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::facts::{OrderStatus, Priority, TransactionType};
use crate::status::{BudgetStatus, DeliveryStatus};

/// Per-department finance summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentSummaryRow {
    /// Department ID.
    pub department_id: DepartmentId,
    /// Department name.
    pub department: String,
    /// Department code.
    pub code: String,
    /// Manager name.
    pub manager: Option<String>,
    /// Allocated budget.
    pub budget_allocation: Decimal,
    /// Revenue in range.
    pub total_revenue: Decimal,
    /// Expenses in range.
    pub total_expenses: Decimal,
    /// Revenue minus expenses.
    pub net_income: Decimal,
    /// Counted transactions.
    pub transaction_count: i64,
    /// Allocation minus expenses, negative when over budget.
    pub remaining_budget: Decimal,
    /// Expenses as a percentage of allocation.
    pub budget_utilization_pct: Decimal,
    /// Classification of expenses against allocation.
    pub budget_status: BudgetStatus,
}

/// One bucket of the finance trend line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinanceTrendPoint {
    /// Bucket label.
    pub period: String,
    /// First day of the bucket.
    pub period_start: NaiveDate,
    /// Revenue in the bucket.
    pub revenue: Decimal,
    /// Expenses in the bucket.
    pub expenses: Decimal,
    /// Revenue minus expenses.
    pub net_income: Decimal,
    /// Counted transactions.
    pub transaction_count: i64,
}

/// A transaction awaiting approval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTransactionRow {
    /// Transaction ID.
    pub transaction_id: TransactionId,
    /// Transaction date.
    pub date: NaiveDate,
    /// Revenue or expense.
    pub transaction_type: TransactionType,
    /// Department name.
    pub department: String,
    /// Cost center name.
    pub cost_center: String,
    /// Account name.
    pub account: String,
    /// Amount.
    pub amount: Decimal,
    /// Counterparty.
    pub vendor_name: Option<String>,
    /// Description.
    pub description: Option<String>,
}

/// Utilization of one budget line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetUtilizationRow {
    /// Budget ID.
    pub budget_id: BudgetId,
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
    /// Budget minus spend, negative when over budget.
    pub remaining_amount: Decimal,
    /// Spend as a percentage of budget.
    pub utilization_pct: Decimal,
    /// Classification of spend against budget.
    pub budget_status: BudgetStatus,
}

/// One bucket of the procurement spend trend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendTrendPoint {
    /// Bucket label.
    pub period: String,
    /// First day of the bucket.
    pub period_start: NaiveDate,
    /// Committed spend in the bucket.
    pub spend: Decimal,
    /// Orders raised in the bucket.
    pub order_count: i64,
}

/// An open order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacklogRow {
    /// Order ID.
    pub order_id: OrderId,
    /// Order number.
    pub order_number: String,
    /// Date raised.
    pub order_date: NaiveDate,
    /// Department name.
    pub department: String,
    /// Vendor name.
    pub vendor: String,
    /// Current status.
    pub status: OrderStatus,
    /// Priority.
    pub priority: Priority,
    /// Grand total.
    pub grand_total: Decimal,
    /// Days since the order was raised, as of the requested date.
    pub days_open: i64,
}

/// Delivery outcome of one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryRow {
    /// Order number.
    pub order_number: String,
    /// Vendor name.
    pub vendor: String,
    /// Promised date.
    pub expected_delivery_date: NaiveDate,
    /// Actual date.
    pub actual_delivery_date: NaiveDate,
    /// `actual - expected`, in days.
    pub delay_days: i64,
    /// Classification of the delay.
    pub delivery_status: DeliveryStatus,
}

/// Vendor scorecard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorPerformanceRow {
    /// Vendor ID.
    pub vendor_id: VendorId,
    /// Vendor name.
    pub vendor: String,
    /// Vendor rating, if the vendor is on file.
    pub rating: Option<Decimal>,
    /// Committed orders.
    pub order_count: i64,
    /// Committed spend.
    pub total_spend: Decimal,
    /// Deliveries on or before the promised date.
    pub on_time_count: i64,
    /// Deliveries after the promised date.
    pub late_count: i64,
    /// On-time deliveries as a percentage of deliveries.
    pub on_time_pct: Decimal,
    /// Mean delay over deliveries, in days.
    pub avg_delay_days: Decimal,
}
