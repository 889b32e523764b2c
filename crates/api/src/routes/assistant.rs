//! Assistant context export.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use finsight_core::dashboard::{FinanceDashboard, ProcurementDashboard};
use finsight_core::engine::DomainKind;
use finsight_core::snapshot::ContextSnapshot;
use tracing::info;

use super::dashboard_request;
use crate::AppState;
use crate::error::ApiResult;
use crate::params::AnalyticsParams;

/// Creates the assistant routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/assistant/context", get(get_context))
}

/// GET /assistant/context
///
/// Renders both dashboards for the requested range and exports them as one
/// snapshot. Widgets without data appear as `null`.
async fn get_context(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsParams>,
) -> ApiResult<Json<ContextSnapshot>> {
    let finance = dashboard_request(&state, &params, DomainKind::Finance)?;
    let procurement = dashboard_request(&state, &params, DomainKind::Procurement)?;

    let finance_page = FinanceDashboard::render(&state.analytics, &finance).await;
    let procurement_page = ProcurementDashboard::render(&state.analytics, &procurement).await;
    let snapshot = ContextSnapshot::build(&finance_page, &procurement_page);
    info!(range = %snapshot.range, insights = snapshot.insights.len(), "Built assistant context");

    Ok(Json(snapshot))
}
