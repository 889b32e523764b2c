//! Context snapshot export for the assistant.
//!
//! A snapshot is a one-way, serializable summary of the currently rendered
//! dashboard pages. Widgets without data are exported as `null` and noted
//! in the insights.

mod insights;

use std::collections::BTreeMap;

use finsight_shared::DateRange;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::dashboard::{FinancePage, ProcurementPage};
use crate::engine::{BreakdownRow, FinanceKpis, ProcurementKpis};
use crate::queries::DepartmentSummaryRow;

pub use insights::{finance_insights, format_money, procurement_insights};

/// Finance section of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinanceContext {
    /// KPIs for the range.
    pub kpis: Option<FinanceKpis>,
    /// Growth deltas against the previous window.
    pub growth: Option<BTreeMap<String, Decimal>>,
    /// Department summaries.
    pub departments: Option<Vec<DepartmentSummaryRow>>,
}

/// Procurement section of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcurementContext {
    /// KPIs for the range.
    pub kpis: Option<ProcurementKpis>,
    /// Growth deltas against the previous window.
    pub growth: Option<BTreeMap<String, Decimal>>,
    /// Top vendors by committed spend.
    pub top_vendors: Option<Vec<BreakdownRow>>,
}

/// Summary of the current dashboards handed to the assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextSnapshot {
    /// Range the dashboards were rendered for.
    pub range: DateRange,
    /// Finance section.
    pub finance: FinanceContext,
    /// Procurement section.
    pub procurement: ProcurementContext,
    /// Derived one-line observations.
    pub insights: Vec<String>,
}

impl ContextSnapshot {
    /// Builds a snapshot from rendered pages.
    #[must_use]
    pub fn build(finance: &FinancePage, procurement: &ProcurementPage) -> Self {
        let mut insights = finance_insights(finance);
        insights.extend(procurement_insights(procurement));

        Self {
            range: finance.range,
            finance: FinanceContext {
                kpis: finance.kpis.data().map(|r| r.current.clone()),
                growth: finance.kpis.data().map(|r| r.growth.clone()),
                departments: finance.departments.data().cloned(),
            },
            procurement: ProcurementContext {
                kpis: procurement.kpis.data().map(|r| r.current.clone()),
                growth: procurement.kpis.data().map(|r| r.growth.clone()),
                top_vendors: procurement.top_vendors.data().cloned(),
            },
            insights,
        }
    }

    /// Exports the snapshot as a nested JSON mapping.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}
