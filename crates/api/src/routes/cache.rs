//! Cache administration.

use axum::{Json, Router, extract::State, routing::post};
use serde::Serialize;
use tracing::info;

use crate::AppState;

/// Response for a cache clear.
#[derive(Debug, Serialize)]
pub struct ClearCacheResponse {
    /// Entries dropped.
    pub cleared: u64,
}

/// POST /cache/clear
///
/// Drops every cached result; the next request for each query recomputes.
async fn clear_cache(State(state): State<AppState>) -> Json<ClearCacheResponse> {
    let cache = state.analytics.cache();
    let cleared = cache.entry_count();
    cache.clear();
    info!(cleared, "Query cache cleared");

    Json(ClearCacheResponse { cleared })
}

/// Creates the cache routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/cache/clear", post(clear_cache))
}
