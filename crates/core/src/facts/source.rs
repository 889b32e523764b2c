//! The data source boundary.

use async_trait::async_trait;
use thiserror::Error;

use super::filter::{BudgetQuery, FactQuery};
use super::types::{BudgetFact, DepartmentFact, OrderFact, TransactionFact, VendorFact};

/// Failures reported by a data source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The store could not be reached.
    #[error("connection failed: {0}")]
    Connectivity(String),

    /// The store rejected or failed the statement.
    #[error("statement failed: {0}")]
    Query(String),
}

/// Read-only access to the relational store.
///
/// Implementations run parameter-bound SELECTs and hand back fact rows with
/// their labels resolved. Connection pooling, retries and health checks are
/// the implementation's concern; callers never retry.
///
/// Implementations must return rows whose date lies inside the inclusive
/// query range and that pass every applicable [`super::FactFilter`] field.
#[async_trait]
pub trait FactSource: Send + Sync {
    /// Transactions dated within the range.
    async fn transactions(&self, query: &FactQuery) -> Result<Vec<TransactionFact>, SourceError>;

    /// Procurement orders raised within the range.
    async fn orders(&self, query: &FactQuery) -> Result<Vec<OrderFact>, SourceError>;

    /// All departments.
    async fn departments(&self) -> Result<Vec<DepartmentFact>, SourceError>;

    /// Budget lines.
    async fn budgets(&self, query: &BudgetQuery) -> Result<Vec<BudgetFact>, SourceError>;

    /// All vendors.
    async fn vendors(&self) -> Result<Vec<VendorFact>, SourceError>;
}
