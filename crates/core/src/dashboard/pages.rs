//! Finance and procurement dashboard pages.

use chrono::NaiveDate;
use finsight_shared::DateRange;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::panel::Panel;
use crate::engine::{BreakdownRow, FinanceKpis, ProcurementKpis};
use crate::facts::FactFilter;
use crate::growth::GrowthReport;
use crate::period::Granularity;
use crate::queries::{
    BacklogRow, BudgetUtilizationRow, DeliveryRow, DepartmentSummaryRow, FinanceTrendPoint,
    PendingTransactionRow, QueryLibrary, SpendTrendPoint, VendorPerformanceRow,
};

/// Parameters of one render pass, fully resolved by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardRequest {
    /// Date range.
    pub range: DateRange,
    /// Entity filters.
    pub filter: FactFilter,
    /// Trend bucket size.
    pub granularity: Granularity,
    /// Fiscal year for budget lines; `None` for all years.
    pub fiscal_year: Option<i32>,
    /// Reference date for backlog ages.
    pub as_of: NaiveDate,
    /// Rows kept in "top N" widgets.
    pub top_n: usize,
}

/// The finance dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancePage {
    /// Range the page was rendered for.
    pub range: DateRange,
    /// KPIs with period-over-period growth.
    pub kpis: Panel<GrowthReport<FinanceKpis>>,
    /// Department summaries.
    pub departments: Panel<Vec<DepartmentSummaryRow>>,
    /// Expenses by department.
    pub expenses_by_department: Panel<Vec<BreakdownRow>>,
    /// Top cost centers by expense.
    pub top_cost_centers: Panel<Vec<BreakdownRow>>,
    /// Revenue and expense trend.
    pub trend: Panel<Vec<FinanceTrendPoint>>,
    /// Transactions awaiting approval.
    pub pending: Panel<Vec<PendingTransactionRow>>,
    /// Budget line utilization.
    pub budgets: Panel<Vec<BudgetUtilizationRow>>,
}

/// The procurement dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcurementPage {
    /// Range the page was rendered for.
    pub range: DateRange,
    /// KPIs with period-over-period growth.
    pub kpis: Panel<GrowthReport<ProcurementKpis>>,
    /// Top vendors by committed spend.
    pub top_vendors: Panel<Vec<BreakdownRow>>,
    /// Committed spend by category.
    pub categories: Panel<Vec<BreakdownRow>>,
    /// Committed spend by department.
    pub departments: Panel<Vec<BreakdownRow>>,
    /// Spend trend.
    pub trend: Panel<Vec<SpendTrendPoint>>,
    /// Open orders.
    pub backlog: Panel<Vec<BacklogRow>>,
    /// Delivery outcomes.
    pub deliveries: Panel<Vec<DeliveryRow>>,
    /// Vendor scorecards.
    pub vendor_performance: Panel<Vec<VendorPerformanceRow>>,
}

fn top(mut rows: Vec<BreakdownRow>, n: usize) -> Vec<BreakdownRow> {
    rows.truncate(n);
    rows
}

/// Finance dashboard render pass.
pub struct FinanceDashboard;

impl FinanceDashboard {
    /// Runs every finance widget's query in turn.
    ///
    /// Never fails: each widget degrades to [`Panel::NoData`] on its own.
    pub async fn render(library: &QueryLibrary, request: &DashboardRequest) -> FinancePage {
        let DashboardRequest {
            range,
            filter,
            granularity,
            fiscal_year,
            top_n,
            ..
        } = request;
        info!(%range, "Rendering finance dashboard");

        FinancePage {
            range: *range,
            kpis: Panel::from_result(
                "finance_kpis",
                library.finance_kpis_with_growth(*range, filter).await,
            ),
            departments: Panel::from_rows(
                "department_summary",
                library.department_summary(*range).await,
            ),
            expenses_by_department: Panel::from_rows(
                "department_expense_breakdown",
                library.department_expense_breakdown(*range, filter).await,
            ),
            top_cost_centers: Panel::from_rows(
                "cost_center_breakdown",
                library
                    .cost_center_breakdown(*range, filter)
                    .await
                    .map(|rows| top(rows, *top_n)),
            ),
            trend: Panel::from_rows(
                "finance_trend",
                library.finance_trend(*range, *granularity, filter).await,
            ),
            pending: Panel::from_rows(
                "pending_transactions",
                library.pending_transactions(*range, filter).await,
            ),
            budgets: Panel::from_rows(
                "budget_utilization",
                library.budget_utilization(*fiscal_year, filter).await,
            ),
        }
    }
}

/// Procurement dashboard render pass.
pub struct ProcurementDashboard;

impl ProcurementDashboard {
    /// Runs every procurement widget's query in turn.
    ///
    /// Never fails: each widget degrades to [`Panel::NoData`] on its own.
    pub async fn render(library: &QueryLibrary, request: &DashboardRequest) -> ProcurementPage {
        let DashboardRequest {
            range,
            filter,
            granularity,
            as_of,
            top_n,
            ..
        } = request;
        info!(%range, "Rendering procurement dashboard");

        ProcurementPage {
            range: *range,
            kpis: Panel::from_result(
                "procurement_kpis",
                library.procurement_kpis_with_growth(*range, filter).await,
            ),
            top_vendors: Panel::from_rows(
                "vendor_breakdown",
                library
                    .vendor_breakdown(*range, filter)
                    .await
                    .map(|rows| top(rows, *top_n)),
            ),
            categories: Panel::from_rows(
                "category_breakdown",
                library.category_breakdown(*range, filter).await,
            ),
            departments: Panel::from_rows(
                "procurement_department_breakdown",
                library.procurement_department_breakdown(*range, filter).await,
            ),
            trend: Panel::from_rows(
                "spend_trend",
                library.spend_trend(*range, *granularity, filter).await,
            ),
            backlog: Panel::from_rows(
                "order_backlog",
                library.order_backlog(*range, filter, *as_of).await,
            ),
            deliveries: Panel::from_rows(
                "delivery_performance",
                library.delivery_performance(*range, filter).await,
            ),
            vendor_performance: Panel::from_rows(
                "vendor_performance",
                library.vendor_performance(*range, filter).await,
            ),
        }
    }
}
