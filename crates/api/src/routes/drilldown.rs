//! Drill-down route.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use finsight_core::drilldown::{DrillRequest, DrillView};
use finsight_core::engine::DomainKind;
use finsight_shared::AppError;

use super::today;
use crate::AppState;
use crate::error::ApiResult;
use crate::params::AnalyticsParams;

/// Creates the drill-down routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/drilldown/{domain}", get(get_drilldown))
}

/// GET /drilldown/{domain}
///
/// `axis` picks the top-level grouping; `department`, `month`, `category`
/// and `vendor` carry the current selections. Omitting every selection
/// returns the top-level aggregate again.
async fn get_drilldown(
    State(state): State<AppState>,
    Path(domain): Path<String>,
    Query(params): Query<AnalyticsParams>,
) -> ApiResult<Json<DrillView>> {
    let domain: DomainKind = domain.parse().map_err(AppError::Validation)?;
    let request = DrillRequest {
        domain,
        range: params.range(today(), &state.dashboard)?,
        filter: params.filter(domain)?,
        axis: params.axis()?,
        state: params.filter_state()?,
    };

    Ok(Json(state.drilldown.resolve(&request).await?))
}
