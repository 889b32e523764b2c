//! Finance queries.

use finsight_shared::DateRange;
use rust_decimal::Decimal;

use super::error::AnalyticsError;
use super::library::{AnalyticsResult, QueryLibrary};
use super::rows::{
    BudgetUtilizationRow, DepartmentSummaryRow, FinanceTrendPoint, PendingTransactionRow,
};
use crate::engine::{BreakdownRow, Dimension, FinanceKpis, breakdown, group_by_period, reportable};
use crate::facts::{
    BudgetQuery, FactFilter, FactQuery, TransactionFact, TransactionStatus, TransactionType,
};
use crate::growth::GrowthReport;
use crate::period::Granularity;
use crate::status::{BudgetStatus, remaining, utilization_pct};

impl QueryLibrary {
    /// Headline finance KPIs.
    ///
    /// # Errors
    ///
    /// Returns an error if the data source fails.
    pub async fn finance_kpis(
        &self,
        range: DateRange,
        filter: &FactFilter,
    ) -> AnalyticsResult<FinanceKpis> {
        const QUERY: &str = "finance_kpis";
        let params = FactQuery::new(range, filter.clone());
        self.cached(QUERY, &params, || async {
            let rows = self.fetch_transactions(QUERY, &params).await?;
            Ok(FinanceKpis::from_transactions(&rows))
        })
        .await
    }

    /// Finance KPIs for the range and its comparison window, with growth.
    ///
    /// # Errors
    ///
    /// Returns an error if either aggregate fails.
    pub async fn finance_kpis_with_growth(
        &self,
        range: DateRange,
        filter: &FactFilter,
    ) -> AnalyticsResult<GrowthReport<FinanceKpis>> {
        self.compare_periods(range, move |r| self.finance_kpis(r, filter))
            .await
    }

    /// Revenue, expenses and budget position for every department.
    ///
    /// Departments without activity appear with zeros. Utilization and status
    /// compare expenses in range against the department's allocation.
    ///
    /// # Errors
    ///
    /// Returns an error if the data source fails.
    pub async fn department_summary(
        &self,
        range: DateRange,
    ) -> AnalyticsResult<Vec<DepartmentSummaryRow>> {
        const QUERY: &str = "department_summary";
        if range.is_inverted() {
            return Ok(Vec::new());
        }
        self.cached(QUERY, &range, || async {
            let departments = self.fetch_departments(QUERY).await?;
            let params = FactQuery::new(range, FactFilter::default());
            let transactions = self.fetch_transactions(QUERY, &params).await?;

            let mut rows: Vec<DepartmentSummaryRow> = departments
                .into_iter()
                .map(|dept| {
                    let own: Vec<TransactionFact> = transactions
                        .iter()
                        .filter(|tx| tx.department_id == dept.id)
                        .cloned()
                        .collect();
                    let kpis = FinanceKpis::from_transactions(&own);
                    DepartmentSummaryRow {
                        department_id: dept.id,
                        department: dept.name,
                        code: dept.code,
                        manager: dept.manager,
                        budget_allocation: dept.budget_allocation,
                        total_revenue: kpis.total_revenue,
                        total_expenses: kpis.total_expenses,
                        net_income: kpis.net_income,
                        transaction_count: kpis.transaction_count,
                        remaining_budget: remaining(dept.budget_allocation, kpis.total_expenses),
                        budget_utilization_pct: utilization_pct(
                            kpis.total_expenses,
                            dept.budget_allocation,
                        ),
                        budget_status: BudgetStatus::classify(
                            kpis.total_expenses,
                            dept.budget_allocation,
                        ),
                    }
                })
                .collect();
            rows.sort_by(|a, b| a.department.cmp(&b.department));
            Ok(rows)
        })
        .await
    }

    /// Expenses grouped by department.
    ///
    /// # Errors
    ///
    /// Returns an error if the data source fails.
    pub async fn department_expense_breakdown(
        &self,
        range: DateRange,
        filter: &FactFilter,
    ) -> AnalyticsResult<Vec<BreakdownRow>> {
        self.expense_breakdown("department_expense_breakdown", range, filter, Dimension::Department)
            .await
    }

    /// Expenses grouped by cost center.
    ///
    /// # Errors
    ///
    /// Returns an error if the data source fails.
    pub async fn cost_center_breakdown(
        &self,
        range: DateRange,
        filter: &FactFilter,
    ) -> AnalyticsResult<Vec<BreakdownRow>> {
        self.expense_breakdown("cost_center_breakdown", range, filter, Dimension::CostCenter)
            .await
    }

    /// Expenses grouped by account.
    ///
    /// # Errors
    ///
    /// Returns an error if the data source fails.
    pub async fn account_breakdown(
        &self,
        range: DateRange,
        filter: &FactFilter,
    ) -> AnalyticsResult<Vec<BreakdownRow>> {
        self.expense_breakdown("account_breakdown", range, filter, Dimension::Account)
            .await
    }

    /// Revenue, expenses and net income per period bucket, earliest first.
    ///
    /// Buckets without transactions are omitted.
    ///
    /// # Errors
    ///
    /// Returns an error if the data source fails.
    pub async fn finance_trend(
        &self,
        range: DateRange,
        granularity: Granularity,
        filter: &FactFilter,
    ) -> AnalyticsResult<Vec<FinanceTrendPoint>> {
        const QUERY: &str = "finance_trend";
        let params = FactQuery::new(range, filter.clone());
        self.cached(QUERY, &(&params, granularity), || async {
            let rows = self.fetch_transactions(QUERY, &params).await?;
            Ok(group_by_period(reportable(&rows), granularity)
                .into_iter()
                .map(|(bucket, txs)| {
                    let (mut revenue, mut expenses) = (Decimal::ZERO, Decimal::ZERO);
                    for tx in &txs {
                        match tx.transaction_type {
                            TransactionType::Revenue => revenue += tx.amount,
                            TransactionType::Expense => expenses += tx.amount,
                        }
                    }
                    FinanceTrendPoint {
                        period: bucket.label,
                        period_start: bucket.start,
                        revenue,
                        expenses,
                        net_income: revenue - expenses,
                        transaction_count: i64::try_from(txs.len()).unwrap_or(i64::MAX),
                    }
                })
                .collect())
        })
        .await
    }

    /// Transactions awaiting approval, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the data source fails.
    pub async fn pending_transactions(
        &self,
        range: DateRange,
        filter: &FactFilter,
    ) -> AnalyticsResult<Vec<PendingTransactionRow>> {
        const QUERY: &str = "pending_transactions";
        let params = FactQuery::new(
            range,
            FactFilter {
                transaction_status: Some(TransactionStatus::Pending),
                ..filter.clone()
            },
        );
        self.cached(QUERY, &params, || async {
            let mut rows: Vec<PendingTransactionRow> = self
                .fetch_transactions(QUERY, &params)
                .await?
                .into_iter()
                .filter(|tx| tx.status == TransactionStatus::Pending)
                .map(|tx| PendingTransactionRow {
                    transaction_id: tx.id,
                    date: tx.date,
                    transaction_type: tx.transaction_type,
                    department: tx.department,
                    cost_center: tx.cost_center,
                    account: tx.account,
                    amount: tx.amount,
                    vendor_name: tx.vendor_name,
                    description: tx.description,
                })
                .collect();
            rows.sort_by_key(|row| row.date);
            Ok(rows)
        })
        .await
    }

    /// Utilization of every budget line, highest utilization first.
    ///
    /// Only the filter's department applies; other filter fields are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the data source fails.
    pub async fn budget_utilization(
        &self,
        fiscal_year: Option<i32>,
        filter: &FactFilter,
    ) -> AnalyticsResult<Vec<BudgetUtilizationRow>> {
        const QUERY: &str = "budget_utilization";
        let params = BudgetQuery {
            fiscal_year,
            department_id: filter.department_id,
        };
        self.cached(QUERY, &params, || async {
            let mut rows: Vec<BudgetUtilizationRow> = self
                .fetch_budgets(QUERY, &params)
                .await?
                .into_iter()
                .map(|b| BudgetUtilizationRow {
                    budget_id: b.id,
                    remaining_amount: remaining(b.budget_amount, b.spent_amount),
                    utilization_pct: utilization_pct(b.spent_amount, b.budget_amount),
                    budget_status: BudgetStatus::classify(b.spent_amount, b.budget_amount),
                    department: b.department,
                    cost_center: b.cost_center,
                    account: b.account,
                    fiscal_year: b.fiscal_year,
                    budget_amount: b.budget_amount,
                    spent_amount: b.spent_amount,
                })
                .collect();
            rows.sort_by(|a, b| {
                b.utilization_pct
                    .cmp(&a.utilization_pct)
                    .then_with(|| a.department.cmp(&b.department))
            });
            Ok(rows)
        })
        .await
    }

    async fn expense_breakdown(
        &self,
        query: &'static str,
        range: DateRange,
        filter: &FactFilter,
        dimension: Dimension,
    ) -> Result<Vec<BreakdownRow>, AnalyticsError> {
        let params = FactQuery::new(range, filter.clone());
        self.cached(query, &params, || async {
            let rows = self.fetch_transactions(query, &params).await?;
            Ok(breakdown(
                reportable(&rows).filter(|tx| tx.transaction_type == TransactionType::Expense),
                dimension,
            ))
        })
        .await
    }
}
