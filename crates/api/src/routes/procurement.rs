//! Procurement routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use finsight_core::dashboard::{ProcurementDashboard, ProcurementPage};
use finsight_core::engine::{BreakdownRow, DomainKind, ProcurementKpis};
use finsight_core::growth::GrowthReport;
use finsight_core::queries::{BacklogRow, DeliveryRow, SpendTrendPoint, VendorPerformanceRow};

use super::{dashboard_request, today};
use crate::AppState;
use crate::error::ApiResult;
use crate::params::AnalyticsParams;

/// Creates the procurement routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/procurement/kpis", get(get_kpis))
        .route("/procurement/vendors", get(get_vendors))
        .route("/procurement/categories", get(get_categories))
        .route("/procurement/departments", get(get_departments))
        .route("/procurement/trend", get(get_trend))
        .route("/procurement/backlog", get(get_backlog))
        .route("/procurement/deliveries", get(get_deliveries))
        .route("/procurement/vendor-performance", get(get_vendor_performance))
        .route("/procurement/dashboard", get(get_dashboard))
}

/// GET /procurement/kpis
async fn get_kpis(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsParams>,
) -> ApiResult<Json<GrowthReport<ProcurementKpis>>> {
    let range = params.range(today(), &state.dashboard)?;
    let filter = params.filter(DomainKind::Procurement)?;
    Ok(Json(
        state
            .analytics
            .procurement_kpis_with_growth(range, &filter)
            .await?,
    ))
}

/// GET /procurement/vendors
async fn get_vendors(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsParams>,
) -> ApiResult<Json<Vec<BreakdownRow>>> {
    let range = params.range(today(), &state.dashboard)?;
    let filter = params.filter(DomainKind::Procurement)?;
    Ok(Json(state.analytics.vendor_breakdown(range, &filter).await?))
}

/// GET /procurement/categories
async fn get_categories(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsParams>,
) -> ApiResult<Json<Vec<BreakdownRow>>> {
    let range = params.range(today(), &state.dashboard)?;
    let filter = params.filter(DomainKind::Procurement)?;
    Ok(Json(
        state.analytics.category_breakdown(range, &filter).await?,
    ))
}

/// GET /procurement/departments
async fn get_departments(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsParams>,
) -> ApiResult<Json<Vec<BreakdownRow>>> {
    let range = params.range(today(), &state.dashboard)?;
    let filter = params.filter(DomainKind::Procurement)?;
    Ok(Json(
        state
            .analytics
            .procurement_department_breakdown(range, &filter)
            .await?,
    ))
}

/// GET /procurement/trend
async fn get_trend(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsParams>,
) -> ApiResult<Json<Vec<SpendTrendPoint>>> {
    let range = params.range(today(), &state.dashboard)?;
    let filter = params.filter(DomainKind::Procurement)?;
    let granularity = params.granularity()?;
    Ok(Json(
        state
            .analytics
            .spend_trend(range, granularity, &filter)
            .await?,
    ))
}

/// GET /procurement/backlog
async fn get_backlog(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsParams>,
) -> ApiResult<Json<Vec<BacklogRow>>> {
    let today = today();
    let range = params.range(today, &state.dashboard)?;
    let filter = params.filter(DomainKind::Procurement)?;
    let as_of = params.as_of(today)?;
    Ok(Json(
        state
            .analytics
            .order_backlog(range, &filter, as_of)
            .await?,
    ))
}

/// GET /procurement/deliveries
async fn get_deliveries(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsParams>,
) -> ApiResult<Json<Vec<DeliveryRow>>> {
    let range = params.range(today(), &state.dashboard)?;
    let filter = params.filter(DomainKind::Procurement)?;
    Ok(Json(
        state.analytics.delivery_performance(range, &filter).await?,
    ))
}

/// GET /procurement/vendor-performance
async fn get_vendor_performance(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsParams>,
) -> ApiResult<Json<Vec<VendorPerformanceRow>>> {
    let range = params.range(today(), &state.dashboard)?;
    let filter = params.filter(DomainKind::Procurement)?;
    Ok(Json(
        state.analytics.vendor_performance(range, &filter).await?,
    ))
}

/// GET /procurement/dashboard
async fn get_dashboard(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsParams>,
) -> ApiResult<Json<ProcurementPage>> {
    let request = dashboard_request(&state, &params, DomainKind::Procurement)?;
    Ok(Json(
        ProcurementDashboard::render(&state.analytics, &request).await,
    ))
}
