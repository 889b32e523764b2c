//! Fact source backed by the reporting tables.
//!
//! Every statement is a read-only SELECT built with the `SeaORM` query
//! builder, so all filter values are bound parameters. Dimension labels are
//! resolved from the master tables in the same call.

use std::collections::HashMap;

use async_trait::async_trait;
use finsight_core::engine::UNASSIGNED;
use finsight_core::facts::{
    self, BudgetFact, BudgetQuery, DepartmentFact, FactQuery, FactSource, OrderFact, SourceError,
    TransactionFact, VendorFact,
};
use finsight_shared::types::{
    AccountId, BudgetId, CategoryId, CostCenterId, DepartmentId, OrderId, TransactionId, VendorId,
};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};
use tracing::debug;
use uuid::Uuid;

use crate::entities::{
    accounts, budgets, categories, cost_centers, departments, procurement_orders,
    sea_orm_active_enums::{OrderStatus, Priority, TransactionStatus, TransactionType},
    transactions, vendors,
};

/// Maps a database error onto the source boundary.
///
/// Connection failures become [`SourceError::Connectivity`]; anything the
/// database rejected becomes [`SourceError::Query`].
#[must_use]
pub fn source_error(err: DbErr) -> SourceError {
    match err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => SourceError::Connectivity(err.to_string()),
        _ => SourceError::Query(err.to_string()),
    }
}

fn label(names: &HashMap<Uuid, String>, id: Uuid) -> String {
    names
        .get(&id)
        .cloned()
        .unwrap_or_else(|| UNASSIGNED.to_string())
}

/// [`FactSource`] over a `SeaORM` connection.
#[derive(Debug, Clone)]
pub struct SeaOrmFactSource {
    db: DatabaseConnection,
}

impl SeaOrmFactSource {
    /// Creates a new fact source.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    // ========================================================================
    // Label lookups
    // ========================================================================

    async fn department_names(&self) -> Result<HashMap<Uuid, String>, DbErr> {
        Ok(departments::Entity::find()
            .all(&self.db)
            .await?
            .into_iter()
            .map(|d| (d.id, d.name))
            .collect())
    }

    async fn cost_center_names(&self) -> Result<HashMap<Uuid, String>, DbErr> {
        Ok(cost_centers::Entity::find()
            .all(&self.db)
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect())
    }

    async fn accounts_by_id(&self) -> Result<HashMap<Uuid, accounts::Model>, DbErr> {
        Ok(accounts::Entity::find()
            .all(&self.db)
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect())
    }

    async fn vendor_names(&self) -> Result<HashMap<Uuid, String>, DbErr> {
        Ok(vendors::Entity::find()
            .all(&self.db)
            .await?
            .into_iter()
            .map(|v| (v.id, v.name))
            .collect())
    }

    async fn categories_by_id(&self) -> Result<HashMap<Uuid, categories::Model>, DbErr> {
        Ok(categories::Entity::find()
            .all(&self.db)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect())
    }

    // ========================================================================
    // Row queries
    // ========================================================================

    async fn load_transactions(&self, query: &FactQuery) -> Result<Vec<TransactionFact>, DbErr> {
        if query.range.is_inverted() {
            return Ok(Vec::new());
        }
        let filter = &query.filter;
        let condition = Condition::all()
            .add(transactions::Column::TransactionDate.between(query.range.from, query.range.to))
            .add_option(
                filter
                    .department_id
                    .map(|id| transactions::Column::DepartmentId.eq(id.into_inner())),
            )
            .add_option(
                filter
                    .cost_center_id
                    .map(|id| transactions::Column::CostCenterId.eq(id.into_inner())),
            )
            .add_option(
                filter
                    .transaction_type
                    .map(|kind| transactions::Column::TransactionType.eq(TransactionType::from(kind))),
            )
            .add_option(
                filter
                    .transaction_status
                    .map(|status| transactions::Column::Status.eq(TransactionStatus::from(status))),
            );

        let rows = transactions::Entity::find()
            .filter(condition)
            .order_by_asc(transactions::Column::TransactionDate)
            .order_by_asc(transactions::Column::Id)
            .all(&self.db)
            .await?;
        debug!(rows = rows.len(), range = %query.range, "Loaded transactions");

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let departments = self.department_names().await?;
        let cost_centers = self.cost_center_names().await?;
        let accounts = self.accounts_by_id().await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let transaction_type = facts::TransactionType::from(row.transaction_type);
                let (account, account_type) = match accounts.get(&row.account_id) {
                    Some(a) => (a.name.clone(), facts::AccountType::from(a.account_type)),
                    None => (
                        UNASSIGNED.to_string(),
                        match transaction_type {
                            facts::TransactionType::Revenue => facts::AccountType::Revenue,
                            facts::TransactionType::Expense => facts::AccountType::Expense,
                        },
                    ),
                };

                TransactionFact {
                    id: TransactionId::from_uuid(row.id),
                    date: row.transaction_date,
                    transaction_type,
                    status: row.status.into(),
                    amount: row.amount,
                    department_id: DepartmentId::from_uuid(row.department_id),
                    department: label(&departments, row.department_id),
                    cost_center_id: CostCenterId::from_uuid(row.cost_center_id),
                    cost_center: label(&cost_centers, row.cost_center_id),
                    account_id: AccountId::from_uuid(row.account_id),
                    account,
                    account_type,
                    vendor_name: row.vendor_name,
                    payment_method: row.payment_method,
                    description: row.description,
                }
            })
            .collect())
    }

    async fn load_orders(&self, query: &FactQuery) -> Result<Vec<OrderFact>, DbErr> {
        if query.range.is_inverted() {
            return Ok(Vec::new());
        }
        let filter = &query.filter;
        let condition = Condition::all()
            .add(procurement_orders::Column::OrderDate.between(query.range.from, query.range.to))
            .add_option(
                filter
                    .department_id
                    .map(|id| procurement_orders::Column::DepartmentId.eq(id.into_inner())),
            )
            .add_option(
                filter
                    .cost_center_id
                    .map(|id| procurement_orders::Column::CostCenterId.eq(id.into_inner())),
            )
            .add_option(
                filter
                    .vendor_id
                    .map(|id| procurement_orders::Column::VendorId.eq(id.into_inner())),
            )
            .add_option(
                filter
                    .category_id
                    .map(|id| procurement_orders::Column::CategoryId.eq(id.into_inner())),
            )
            .add_option(
                filter
                    .order_status
                    .map(|status| procurement_orders::Column::Status.eq(OrderStatus::from(status))),
            )
            .add_option(
                filter
                    .priority
                    .map(|priority| procurement_orders::Column::Priority.eq(Priority::from(priority))),
            );

        let rows = procurement_orders::Entity::find()
            .filter(condition)
            .order_by_asc(procurement_orders::Column::OrderDate)
            .order_by_asc(procurement_orders::Column::OrderNumber)
            .all(&self.db)
            .await?;
        debug!(rows = rows.len(), range = %query.range, "Loaded procurement orders");

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let departments = self.department_names().await?;
        let cost_centers = self.cost_center_names().await?;
        let vendors = self.vendor_names().await?;
        let categories = self.categories_by_id().await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let category = categories.get(&row.category_id);
                let parent_category = category
                    .and_then(|c| c.parent_id)
                    .and_then(|parent| categories.get(&parent))
                    .map(|p| p.name.clone());

                OrderFact {
                    id: OrderId::from_uuid(row.id),
                    order_number: row.order_number,
                    order_date: row.order_date,
                    department_id: DepartmentId::from_uuid(row.department_id),
                    department: label(&departments, row.department_id),
                    vendor_id: VendorId::from_uuid(row.vendor_id),
                    vendor: label(&vendors, row.vendor_id),
                    category_id: CategoryId::from_uuid(row.category_id),
                    category: category.map_or_else(|| UNASSIGNED.to_string(), |c| c.name.clone()),
                    parent_category,
                    cost_center_id: CostCenterId::from_uuid(row.cost_center_id),
                    cost_center: label(&cost_centers, row.cost_center_id),
                    subtotal: row.subtotal,
                    tax_amount: row.tax_amount,
                    shipping_amount: row.shipping_amount,
                    grand_total: row.grand_total,
                    status: row.status.into(),
                    priority: row.priority.into(),
                    expected_delivery_date: row.expected_delivery_date,
                    actual_delivery_date: row.actual_delivery_date,
                }
            })
            .collect())
    }

    async fn load_budgets(&self, query: &BudgetQuery) -> Result<Vec<BudgetFact>, DbErr> {
        let condition = Condition::all()
            .add_option(
                query
                    .fiscal_year
                    .map(|year| budgets::Column::FiscalYear.eq(year)),
            )
            .add_option(
                query
                    .department_id
                    .map(|id| budgets::Column::DepartmentId.eq(id.into_inner())),
            );

        let rows = budgets::Entity::find()
            .filter(condition)
            .order_by_asc(budgets::Column::FiscalYear)
            .order_by_asc(budgets::Column::Id)
            .all(&self.db)
            .await?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let departments = self.department_names().await?;
        let cost_centers = self.cost_center_names().await?;
        let accounts = self.accounts_by_id().await?;

        Ok(rows
            .into_iter()
            .map(|row| BudgetFact {
                id: BudgetId::from_uuid(row.id),
                department_id: DepartmentId::from_uuid(row.department_id),
                department: label(&departments, row.department_id),
                cost_center: label(&cost_centers, row.cost_center_id),
                account: accounts
                    .get(&row.account_id)
                    .map_or_else(|| UNASSIGNED.to_string(), |a| a.name.clone()),
                fiscal_year: row.fiscal_year,
                budget_amount: row.budget_amount,
                spent_amount: row.spent_amount,
                status: row.status,
            })
            .collect())
    }
}

#[async_trait]
impl FactSource for SeaOrmFactSource {
    async fn transactions(&self, query: &FactQuery) -> Result<Vec<TransactionFact>, SourceError> {
        self.load_transactions(query).await.map_err(source_error)
    }

    async fn orders(&self, query: &FactQuery) -> Result<Vec<OrderFact>, SourceError> {
        self.load_orders(query).await.map_err(source_error)
    }

    async fn departments(&self) -> Result<Vec<DepartmentFact>, SourceError> {
        let rows = departments::Entity::find()
            .order_by_asc(departments::Column::Name)
            .all(&self.db)
            .await
            .map_err(source_error)?;

        Ok(rows
            .into_iter()
            .map(|d| DepartmentFact {
                id: DepartmentId::from_uuid(d.id),
                name: d.name,
                code: d.code,
                manager: d.manager,
                budget_allocation: d.budget_allocation,
            })
            .collect())
    }

    async fn budgets(&self, query: &BudgetQuery) -> Result<Vec<BudgetFact>, SourceError> {
        self.load_budgets(query).await.map_err(source_error)
    }

    async fn vendors(&self) -> Result<Vec<VendorFact>, SourceError> {
        let rows = vendors::Entity::find()
            .order_by_asc(vendors::Column::Name)
            .all(&self.db)
            .await
            .map_err(source_error)?;

        Ok(rows
            .into_iter()
            .map(|v| VendorFact {
                id: VendorId::from_uuid(v.id),
                name: v.name,
                code: v.code,
                rating: v.rating,
                credit_limit: v.credit_limit,
                is_active: v.is_active,
            })
            .collect())
    }
}
