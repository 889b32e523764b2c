//! In-memory fact source for fixtures and offline runs.

use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::filter::{BudgetQuery, FactQuery};
use super::source::{FactSource, SourceError};
use super::types::{BudgetFact, DepartmentFact, OrderFact, TransactionFact, VendorFact};

/// A [`FactSource`] backed by vectors.
///
/// Applies the same range and filter semantics as the database source and
/// counts every call, which lets callers assert whether a cached query
/// reached the store.
#[derive(Debug, Default)]
pub struct InMemoryFacts {
    transactions: Vec<TransactionFact>,
    orders: Vec<OrderFact>,
    departments: Vec<DepartmentFact>,
    budgets: Vec<BudgetFact>,
    vendors: Vec<VendorFact>,
    calls: AtomicUsize,
    failure: Mutex<Option<SourceError>>,
}

impl InMemoryFacts {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds transactions.
    #[must_use]
    pub fn with_transactions(mut self, rows: impl IntoIterator<Item = TransactionFact>) -> Self {
        self.transactions.extend(rows);
        self
    }

    /// Adds orders.
    #[must_use]
    pub fn with_orders(mut self, rows: impl IntoIterator<Item = OrderFact>) -> Self {
        self.orders.extend(rows);
        self
    }

    /// Adds departments.
    #[must_use]
    pub fn with_departments(mut self, rows: impl IntoIterator<Item = DepartmentFact>) -> Self {
        self.departments.extend(rows);
        self
    }

    /// Adds budget lines.
    #[must_use]
    pub fn with_budgets(mut self, rows: impl IntoIterator<Item = BudgetFact>) -> Self {
        self.budgets.extend(rows);
        self
    }

    /// Adds vendors.
    #[must_use]
    pub fn with_vendors(mut self, rows: impl IntoIterator<Item = VendorFact>) -> Self {
        self.vendors.extend(rows);
        self
    }

    /// Number of calls made against this source so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Makes every subsequent call fail with `error` until cleared with `None`.
    pub fn set_failure(&self, error: Option<SourceError>) {
        *self.failure.lock().unwrap_or_else(PoisonError::into_inner) = error;
    }

    fn enter(&self) -> Result<(), SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self
            .failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl FactSource for InMemoryFacts {
    async fn transactions(&self, query: &FactQuery) -> Result<Vec<TransactionFact>, SourceError> {
        self.enter()?;
        let mut rows: Vec<_> = self
            .transactions
            .iter()
            .filter(|tx| query.range.contains(tx.date) && query.filter.matches_transaction(tx))
            .cloned()
            .collect();
        rows.sort_by_key(|tx| tx.date);
        Ok(rows)
    }

    async fn orders(&self, query: &FactQuery) -> Result<Vec<OrderFact>, SourceError> {
        self.enter()?;
        let mut rows: Vec<_> = self
            .orders
            .iter()
            .filter(|o| query.range.contains(o.order_date) && query.filter.matches_order(o))
            .cloned()
            .collect();
        rows.sort_by_key(|o| o.order_date);
        Ok(rows)
    }

    async fn departments(&self) -> Result<Vec<DepartmentFact>, SourceError> {
        self.enter()?;
        let mut rows = self.departments.clone();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn budgets(&self, query: &BudgetQuery) -> Result<Vec<BudgetFact>, SourceError> {
        self.enter()?;
        Ok(self
            .budgets
            .iter()
            .filter(|b| query.fiscal_year.is_none_or(|year| b.fiscal_year == year))
            .filter(|b| query.department_id.is_none_or(|id| b.department_id == id))
            .cloned()
            .collect())
    }

    async fn vendors(&self) -> Result<Vec<VendorFact>, SourceError> {
        self.enter()?;
        let mut rows = self.vendors.clone();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }
}
