//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - JSON routes over the analytics query library
//! - Dashboard, drill-down and assistant context endpoints
//! - Query parameter parsing and error responses

pub mod error;
pub mod params;
pub mod routes;

use axum::Router;
use finsight_core::drilldown::DrillDownResolver;
use finsight_core::queries::QueryLibrary;
use finsight_shared::config::DashboardConfig;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Cached query library over the configured fact source.
    pub analytics: QueryLibrary,
    /// Drill-down resolver sharing the library's cache.
    pub drilldown: DrillDownResolver,
    /// Defaults for omitted request parameters.
    pub dashboard: DashboardConfig,
}

impl AppState {
    /// Creates the state for a query library.
    #[must_use]
    pub fn new(analytics: QueryLibrary, dashboard: DashboardConfig) -> Self {
        Self {
            drilldown: DrillDownResolver::new(analytics.clone()),
            analytics,
            dashboard,
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(
            ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
        )
        .with_state(state)
}
