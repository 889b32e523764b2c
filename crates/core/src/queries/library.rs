//! The query library: named, parameterized, cached analytics queries.

use std::fmt::Debug;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use finsight_shared::DateRange;
use serde::Serialize;
use tracing::error;

use super::error::AnalyticsError;
use crate::cache::{CacheKey, QueryCache};
use crate::engine::KpiSet;
use crate::facts::{
    BudgetFact, BudgetQuery, DepartmentFact, FactFilter, FactQuery, FactSource, OrderFact,
    TransactionFact, VendorFact,
};
use crate::growth::GrowthReport;
use crate::period::comparison_window;

/// Result type for analytics queries.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Named analytics queries over a [`FactSource`], cached in a [`QueryCache`].
///
/// Every query is keyed by its name plus its full argument tuple. Arguments
/// that move with time, such as `as_of`, must be resolved by the caller.
/// Finance queries live in `finance.rs`, procurement queries in
/// `procurement.rs`.
#[derive(Clone)]
pub struct QueryLibrary {
    source: Arc<dyn FactSource>,
    cache: QueryCache,
    ttl: Duration,
}

impl QueryLibrary {
    /// Creates a library using the cache's default TTL.
    #[must_use]
    pub fn new(source: Arc<dyn FactSource>, cache: QueryCache) -> Self {
        let ttl = cache.default_ttl();
        Self { source, cache, ttl }
    }

    /// Overrides the TTL applied to results of this library.
    #[must_use]
    pub const fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// The shared result cache.
    #[must_use]
    pub const fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Row-level transactions for a range, the base of finance drill-downs.
    pub async fn transactions(
        &self,
        range: DateRange,
        filter: &FactFilter,
    ) -> AnalyticsResult<Vec<TransactionFact>> {
        const QUERY: &str = "transactions";
        let query = FactQuery::new(range, filter.clone());
        self.cached(QUERY, &query, || self.fetch_transactions(QUERY, &query))
            .await
    }

    /// Row-level orders for a range, the base of procurement drill-downs.
    pub async fn orders(
        &self,
        range: DateRange,
        filter: &FactFilter,
    ) -> AnalyticsResult<Vec<OrderFact>> {
        const QUERY: &str = "orders";
        let query = FactQuery::new(range, filter.clone());
        self.cached(QUERY, &query, || self.fetch_orders(QUERY, &query))
            .await
    }

    // ========================================================================
    // Shared plumbing for the named queries
    // ========================================================================

    pub(super) async fn cached<A, T, F, Fut>(
        &self,
        query: &'static str,
        args: &A,
        compute: F,
    ) -> AnalyticsResult<T>
    where
        A: Serialize + Debug + ?Sized,
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = AnalyticsResult<T>>,
    {
        self.cache
            .get_or_try_compute(CacheKey::new(query, args), self.ttl, compute)
            .await
    }

    /// Runs `current_of` for `range` and for its comparison window.
    pub(super) async fn compare_periods<K, F, Fut>(
        &self,
        range: DateRange,
        current_of: F,
    ) -> AnalyticsResult<GrowthReport<K>>
    where
        K: KpiSet,
        F: Fn(DateRange) -> Fut,
        Fut: Future<Output = AnalyticsResult<K>>,
    {
        let current = current_of(range).await?;
        let previous = current_of(comparison_window(&range)).await?;
        Ok(GrowthReport::compare(range, current, previous))
    }

    pub(super) async fn fetch_transactions(
        &self,
        query: &'static str,
        params: &FactQuery,
    ) -> AnalyticsResult<Vec<TransactionFact>> {
        if params.range.is_inverted() {
            return Ok(Vec::new());
        }
        self.source
            .transactions(params)
            .await
            .map_err(|e| failed(query, e))
    }

    pub(super) async fn fetch_orders(
        &self,
        query: &'static str,
        params: &FactQuery,
    ) -> AnalyticsResult<Vec<OrderFact>> {
        if params.range.is_inverted() {
            return Ok(Vec::new());
        }
        self.source.orders(params).await.map_err(|e| failed(query, e))
    }

    pub(super) async fn fetch_departments(
        &self,
        query: &'static str,
    ) -> AnalyticsResult<Vec<DepartmentFact>> {
        self.source.departments().await.map_err(|e| failed(query, e))
    }

    pub(super) async fn fetch_budgets(
        &self,
        query: &'static str,
        params: &BudgetQuery,
    ) -> AnalyticsResult<Vec<BudgetFact>> {
        self.source
            .budgets(params)
            .await
            .map_err(|e| failed(query, e))
    }

    pub(super) async fn fetch_vendors(&self, query: &'static str) -> AnalyticsResult<Vec<VendorFact>> {
        self.source.vendors().await.map_err(|e| failed(query, e))
    }
}

impl Debug for QueryLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryLibrary")
            .field("cache", &self.cache)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

fn failed(query: &'static str, err: crate::facts::SourceError) -> AnalyticsError {
    error!(query, error = %err, "Analytics query failed");
    AnalyticsError::from_source(query, err)
}
