//! KPI sets for the finance and procurement domains.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::aggregate::{mean, percent_of};
use super::domain::{Domain, FINANCE, PROCUREMENT};
use crate::facts::{OrderFact, OrderStatus, TransactionFact, TransactionStatus, TransactionType};
use crate::status::DeliveryStatus;

/// A KPI record whose metrics can be looked up by name.
pub trait KpiSet {
    /// Domain the KPI set belongs to.
    fn domain() -> &'static Domain;

    /// Value of the named metric, `None` for unknown names.
    fn metric(&self, name: &str) -> Option<Decimal>;
}

/// Headline finance figures for a date range.
///
/// Rejected transactions are excluded. All fields are zero for an empty range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinanceKpis {
    /// Sum of revenue.
    pub total_revenue: Decimal,
    /// Sum of expenses.
    pub total_expenses: Decimal,
    /// Revenue minus expenses.
    pub net_income: Decimal,
    /// Number of counted transactions.
    pub transaction_count: i64,
    /// Mean transaction amount.
    pub avg_transaction_value: Decimal,
    /// Net income as a percentage of revenue.
    pub profit_margin_pct: Decimal,
}

impl FinanceKpis {
    /// Aggregates KPIs from transaction rows.
    #[must_use]
    pub fn from_transactions(rows: &[TransactionFact]) -> Self {
        let mut total_revenue = Decimal::ZERO;
        let mut total_expenses = Decimal::ZERO;
        let mut transaction_count = 0i64;

        for tx in rows
            .iter()
            .filter(|tx| tx.status != TransactionStatus::Rejected)
        {
            match tx.transaction_type {
                TransactionType::Revenue => total_revenue += tx.amount,
                TransactionType::Expense => total_expenses += tx.amount,
            }
            transaction_count += 1;
        }

        let net_income = total_revenue - total_expenses;

        Self {
            total_revenue,
            total_expenses,
            net_income,
            transaction_count,
            avg_transaction_value: mean(total_revenue + total_expenses, transaction_count),
            profit_margin_pct: percent_of(net_income, total_revenue),
        }
    }
}

impl KpiSet for FinanceKpis {
    fn domain() -> &'static Domain {
        &FINANCE
    }

    fn metric(&self, name: &str) -> Option<Decimal> {
        match name {
            "total_revenue" => Some(self.total_revenue),
            "total_expenses" => Some(self.total_expenses),
            "net_income" => Some(self.net_income),
            "transaction_count" => Some(Decimal::from(self.transaction_count)),
            "avg_transaction_value" => Some(self.avg_transaction_value),
            "profit_margin_pct" => Some(self.profit_margin_pct),
            _ => None,
        }
    }
}

/// Headline procurement figures for a date range.
///
/// `order_count` counts every order raised in range; spend figures count
/// committed orders only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcurementKpis {
    /// Orders raised in range.
    pub order_count: i64,
    /// Committed spend.
    pub total_spend: Decimal,
    /// Mean committed order value.
    pub avg_order_value: Decimal,
    /// Distinct vendors with committed orders.
    pub active_vendor_count: i64,
    /// Orders awaiting approval.
    pub pending_order_count: i64,
    /// Share of delivered orders that arrived on time.
    pub on_time_delivery_pct: Decimal,
}

impl ProcurementKpis {
    /// Aggregates KPIs from order rows.
    #[must_use]
    pub fn from_orders(rows: &[OrderFact]) -> Self {
        let mut total_spend = Decimal::ZERO;
        let mut committed = 0i64;
        let mut vendors = HashSet::new();
        let mut pending_order_count = 0i64;
        let mut delivered = 0i64;
        let mut on_time = 0i64;

        for order in rows {
            if order.status.is_committed() {
                total_spend += order.grand_total;
                committed += 1;
                vendors.insert(order.vendor_id);
            }
            if order.status == OrderStatus::Submitted {
                pending_order_count += 1;
            }
            if let Some(delay) = order.delay_days() {
                delivered += 1;
                if DeliveryStatus::from_delay(delay).is_on_time() {
                    on_time += 1;
                }
            }
        }

        Self {
            order_count: i64::try_from(rows.len()).unwrap_or(i64::MAX),
            total_spend,
            avg_order_value: mean(total_spend, committed),
            active_vendor_count: i64::try_from(vendors.len()).unwrap_or(i64::MAX),
            pending_order_count,
            on_time_delivery_pct: percent_of(Decimal::from(on_time), Decimal::from(delivered)),
        }
    }
}

impl KpiSet for ProcurementKpis {
    fn domain() -> &'static Domain {
        &PROCUREMENT
    }

    fn metric(&self, name: &str) -> Option<Decimal> {
        match name {
            "order_count" => Some(Decimal::from(self.order_count)),
            "total_spend" => Some(self.total_spend),
            "avg_order_value" => Some(self.avg_order_value),
            "active_vendor_count" => Some(Decimal::from(self.active_vendor_count)),
            "pending_order_count" => Some(Decimal::from(self.pending_order_count)),
            "on_time_delivery_pct" => Some(self.on_time_delivery_pct),
            _ => None,
        }
    }
}
