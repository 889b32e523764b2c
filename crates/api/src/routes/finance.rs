//! Finance routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use finsight_core::dashboard::{FinanceDashboard, FinancePage};
use finsight_core::engine::{BreakdownRow, DomainKind, FinanceKpis};
use finsight_core::growth::GrowthReport;
use finsight_core::queries::{
    BudgetUtilizationRow, DepartmentSummaryRow, FinanceTrendPoint, PendingTransactionRow,
};

use super::{dashboard_request, today};
use crate::AppState;
use crate::error::ApiResult;
use crate::params::AnalyticsParams;

/// Creates the finance routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/finance/kpis", get(get_kpis))
        .route("/finance/departments", get(get_departments))
        .route("/finance/expenses", get(get_expenses_by_department))
        .route("/finance/cost-centers", get(get_cost_centers))
        .route("/finance/accounts", get(get_accounts))
        .route("/finance/trend", get(get_trend))
        .route("/finance/pending", get(get_pending))
        .route("/finance/budgets", get(get_budgets))
        .route("/finance/dashboard", get(get_dashboard))
}

/// GET /finance/kpis
async fn get_kpis(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsParams>,
) -> ApiResult<Json<GrowthReport<FinanceKpis>>> {
    let range = params.range(today(), &state.dashboard)?;
    let filter = params.filter(DomainKind::Finance)?;
    Ok(Json(
        state
            .analytics
            .finance_kpis_with_growth(range, &filter)
            .await?,
    ))
}

/// GET /finance/departments
async fn get_departments(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsParams>,
) -> ApiResult<Json<Vec<DepartmentSummaryRow>>> {
    let range = params.range(today(), &state.dashboard)?;
    Ok(Json(state.analytics.department_summary(range).await?))
}

/// GET /finance/expenses
async fn get_expenses_by_department(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsParams>,
) -> ApiResult<Json<Vec<BreakdownRow>>> {
    let range = params.range(today(), &state.dashboard)?;
    let filter = params.filter(DomainKind::Finance)?;
    Ok(Json(
        state
            .analytics
            .department_expense_breakdown(range, &filter)
            .await?,
    ))
}

/// GET /finance/cost-centers
async fn get_cost_centers(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsParams>,
) -> ApiResult<Json<Vec<BreakdownRow>>> {
    let range = params.range(today(), &state.dashboard)?;
    let filter = params.filter(DomainKind::Finance)?;
    Ok(Json(
        state.analytics.cost_center_breakdown(range, &filter).await?,
    ))
}

/// GET /finance/accounts
async fn get_accounts(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsParams>,
) -> ApiResult<Json<Vec<BreakdownRow>>> {
    let range = params.range(today(), &state.dashboard)?;
    let filter = params.filter(DomainKind::Finance)?;
    Ok(Json(state.analytics.account_breakdown(range, &filter).await?))
}

/// GET /finance/trend
async fn get_trend(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsParams>,
) -> ApiResult<Json<Vec<FinanceTrendPoint>>> {
    let range = params.range(today(), &state.dashboard)?;
    let filter = params.filter(DomainKind::Finance)?;
    let granularity = params.granularity()?;
    Ok(Json(
        state
            .analytics
            .finance_trend(range, granularity, &filter)
            .await?,
    ))
}

/// GET /finance/pending
async fn get_pending(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsParams>,
) -> ApiResult<Json<Vec<PendingTransactionRow>>> {
    let range = params.range(today(), &state.dashboard)?;
    let filter = params.filter(DomainKind::Finance)?;
    Ok(Json(
        state.analytics.pending_transactions(range, &filter).await?,
    ))
}

/// GET /finance/budgets
async fn get_budgets(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsParams>,
) -> ApiResult<Json<Vec<BudgetUtilizationRow>>> {
    let fiscal_year = params.fiscal_year()?;
    let filter = params.filter(DomainKind::Finance)?;
    Ok(Json(
        state
            .analytics
            .budget_utilization(fiscal_year, &filter)
            .await?,
    ))
}

/// GET /finance/dashboard
///
/// Always 200 once parameters are valid: failed widgets render as `no_data`.
async fn get_dashboard(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsParams>,
) -> ApiResult<Json<FinancePage>> {
    let request = dashboard_request(&state, &params, DomainKind::Finance)?;
    Ok(Json(
        FinanceDashboard::render(&state.analytics, &request).await,
    ))
}
