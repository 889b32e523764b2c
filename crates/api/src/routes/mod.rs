//! API route definitions.

use axum::Router;
use chrono::{NaiveDate, Utc};
use finsight_core::dashboard::DashboardRequest;
use finsight_core::engine::DomainKind;
use finsight_shared::AppError;

use crate::AppState;
use crate::params::AnalyticsParams;

pub mod assistant;
pub mod cache;
pub mod drilldown;
pub mod finance;
pub mod health;
pub mod procurement;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(finance::routes())
        .merge(procurement::routes())
        .merge(drilldown::routes())
        .merge(assistant::routes())
        .merge(cache::routes())
}

/// Today's date, the anchor of default ranges.
pub(crate) fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Resolves every render pass parameter for `domain`.
pub(crate) fn dashboard_request(
    state: &AppState,
    params: &AnalyticsParams,
    domain: DomainKind,
) -> Result<DashboardRequest, AppError> {
    let today = today();
    Ok(DashboardRequest {
        range: params.range(today, &state.dashboard)?,
        filter: params.filter(domain)?,
        granularity: params.granularity()?,
        fiscal_year: params.fiscal_year()?,
        as_of: params.as_of(today)?,
        top_n: state.dashboard.top_n,
    })
}
