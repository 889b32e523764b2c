//! Integration tests for the `SeaORM` fact source.
//!
//! Runs against an in-memory SQLite database built from the entities.

use std::sync::Arc;

use chrono::NaiveDate;
use finsight_core::cache::QueryCache;
use finsight_core::facts::{
    self, BudgetQuery, FactFilter, FactQuery, FactSource, Priority as FactPriority,
};
use finsight_core::queries::QueryLibrary;
use finsight_core::status::BudgetStatus;
use finsight_db::create_schema;
use finsight_db::entities::sea_orm_active_enums::{
    AccountType, OrderStatus, Priority, TransactionStatus, TransactionType,
};
use finsight_db::entities::{
    accounts, budgets, categories, cost_centers, departments, procurement_orders, transactions,
    vendors,
};
use finsight_db::SeaOrmFactSource;
use finsight_shared::DateRange;
use finsight_shared::types::{DepartmentId, VendorId};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn january() -> DateRange {
    DateRange::new(date(2024, 1, 1), date(2024, 1, 31))
}

/// Ids of the seeded master data.
struct Seeded {
    sales: Uuid,
    marketing: Uuid,
    acme: Uuid,
    globex: Uuid,
    laptops: Uuid,
}

async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    create_schema(&db).await.expect("Failed to create tables");
    db
}

async fn insert_department(db: &DatabaseConnection, name: &str, code: &str, alloc: Decimal) -> Uuid {
    let id = Uuid::new_v4();
    departments::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        code: Set(code.to_string()),
        manager: Set(None),
        budget_allocation: Set(alloc),
    }
    .insert(db)
    .await
    .expect("Failed to insert department");
    id
}

async fn insert_cost_center(db: &DatabaseConnection, name: &str, department_id: Uuid) -> Uuid {
    let id = Uuid::new_v4();
    cost_centers::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        code: Set(name.to_uppercase().replace(' ', "-")),
        department_id: Set(department_id),
    }
    .insert(db)
    .await
    .expect("Failed to insert cost center");
    id
}

async fn insert_account(db: &DatabaseConnection, name: &str, code: &str, kind: AccountType) -> Uuid {
    let id = Uuid::new_v4();
    accounts::ActiveModel {
        id: Set(id),
        code: Set(code.to_string()),
        name: Set(name.to_string()),
        account_type: Set(kind),
        parent_id: Set(None),
    }
    .insert(db)
    .await
    .expect("Failed to insert account");
    id
}

async fn insert_vendor(db: &DatabaseConnection, name: &str, rating: Decimal) -> Uuid {
    let id = Uuid::new_v4();
    vendors::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        code: Set(name.to_uppercase()),
        rating: Set(rating),
        credit_limit: Set(dec!(50000)),
        is_active: Set(true),
    }
    .insert(db)
    .await
    .expect("Failed to insert vendor");
    id
}

async fn insert_category(db: &DatabaseConnection, name: &str, parent_id: Option<Uuid>) -> Uuid {
    let id = Uuid::new_v4();
    categories::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        code: Set(name.to_uppercase()),
        parent_id: Set(parent_id),
    }
    .insert(db)
    .await
    .expect("Failed to insert category");
    id
}

#[allow(clippy::too_many_arguments)]
async fn insert_transaction(
    db: &DatabaseConnection,
    kind: TransactionType,
    status: TransactionStatus,
    department_id: Uuid,
    cost_center_id: Uuid,
    account_id: Uuid,
    amount: Decimal,
    on: NaiveDate,
) {
    transactions::ActiveModel {
        id: Set(Uuid::new_v4()),
        transaction_date: Set(on),
        transaction_type: Set(kind),
        department_id: Set(department_id),
        cost_center_id: Set(cost_center_id),
        account_id: Set(account_id),
        amount: Set(amount),
        status: Set(status),
        vendor_name: Set(None),
        payment_method: Set(Some("Wire".to_string())),
        description: Set(None),
    }
    .insert(db)
    .await
    .expect("Failed to insert transaction");
}

#[allow(clippy::too_many_arguments)]
async fn insert_order(
    db: &DatabaseConnection,
    number: &str,
    department_id: Uuid,
    cost_center_id: Uuid,
    vendor_id: Uuid,
    category_id: Uuid,
    total: Decimal,
    on: NaiveDate,
    status: OrderStatus,
    priority: Priority,
    delivery: Option<(NaiveDate, NaiveDate)>,
) {
    procurement_orders::ActiveModel {
        id: Set(Uuid::new_v4()),
        order_number: Set(number.to_string()),
        order_date: Set(on),
        department_id: Set(department_id),
        vendor_id: Set(vendor_id),
        category_id: Set(category_id),
        cost_center_id: Set(cost_center_id),
        subtotal: Set(total),
        tax_amount: Set(Decimal::ZERO),
        shipping_amount: Set(Decimal::ZERO),
        grand_total: Set(total),
        status: Set(status),
        priority: Set(priority),
        expected_delivery_date: Set(delivery.map(|(expected, _)| expected)),
        actual_delivery_date: Set(delivery.map(|(_, actual)| actual)),
    }
    .insert(db)
    .await
    .expect("Failed to insert order");
}

/// Seeds two departments with January activity and a December revenue.
async fn seed(db: &DatabaseConnection) -> Seeded {
    let sales = insert_department(db, "Sales", "SAL", dec!(5000)).await;
    let marketing = insert_department(db, "Marketing", "MKT", dec!(1000)).await;
    let sales_core = insert_cost_center(db, "Sales Core", sales).await;
    let campaigns = insert_cost_center(db, "Campaigns", marketing).await;
    let revenue_account = insert_account(db, "Sales Revenue", "4000", AccountType::Revenue).await;
    let ads_account = insert_account(db, "Advertising", "6100", AccountType::Expense).await;

    let acme = insert_vendor(db, "Acme", dec!(4.5)).await;
    let globex = insert_vendor(db, "Globex", dec!(3)).await;
    let hardware = insert_category(db, "Hardware", None).await;
    let laptops = insert_category(db, "Laptops", Some(hardware)).await;

    use TransactionStatus::{Completed, Pending, Rejected};
    use TransactionType::{Expense, Revenue};
    insert_transaction(db, Revenue, Completed, sales, sales_core, revenue_account, dec!(1000), date(2024, 1, 8)).await;
    insert_transaction(db, Expense, Completed, marketing, campaigns, ads_account, dec!(300), date(2024, 1, 9)).await;
    insert_transaction(db, Expense, Pending, marketing, campaigns, ads_account, dec!(650), date(2024, 1, 20)).await;
    insert_transaction(db, Expense, Rejected, marketing, campaigns, ads_account, dec!(99), date(2024, 1, 21)).await;
    insert_transaction(db, Revenue, Completed, sales, sales_core, revenue_account, dec!(400), date(2023, 12, 20)).await;

    insert_order(
        db, "PO-001", marketing, campaigns, acme, laptops, dec!(1500), date(2024, 1, 4),
        OrderStatus::Received, Priority::Medium,
        Some((date(2024, 1, 10), date(2024, 1, 12))),
    )
    .await;
    insert_order(
        db, "PO-002", sales, sales_core, globex, hardware, dec!(500), date(2024, 1, 15),
        OrderStatus::Submitted, Priority::Urgent, None,
    )
    .await;
    insert_order(
        db, "PO-003", sales, sales_core, globex, hardware, dec!(250), date(2024, 1, 16),
        OrderStatus::Cancelled, Priority::Low, None,
    )
    .await;

    budgets::ActiveModel {
        id: Set(Uuid::new_v4()),
        department_id: Set(marketing),
        cost_center_id: Set(campaigns),
        account_id: Set(ads_account),
        fiscal_year: Set(2024),
        budget_amount: Set(dec!(1000)),
        spent_amount: Set(dec!(950)),
        status: Set("Approved".to_string()),
    }
    .insert(db)
    .await
    .expect("Failed to insert budget");

    Seeded {
        sales,
        marketing,
        acme,
        globex,
        laptops,
    }
}

#[tokio::test]
async fn test_transactions_resolve_labels_in_date_order() {
    let db = setup_test_db().await;
    seed(&db).await;
    let source = SeaOrmFactSource::new(db);

    let rows = source
        .transactions(&FactQuery::new(january(), FactFilter::default()))
        .await
        .unwrap();

    assert_eq!(rows.len(), 4);
    assert!(rows.windows(2).all(|w| w[0].date <= w[1].date));
    assert_eq!(rows[0].department, "Sales");
    assert_eq!(rows[0].cost_center, "Sales Core");
    assert_eq!(rows[0].account, "Sales Revenue");
    assert_eq!(rows[0].account_type, facts::AccountType::Revenue);
    assert_eq!(rows[0].amount, dec!(1000));
    assert_eq!(rows[1].transaction_type, facts::TransactionType::Expense);
}

#[tokio::test]
async fn test_range_bounds_are_inclusive() {
    let db = setup_test_db().await;
    seed(&db).await;
    let source = SeaOrmFactSource::new(db);

    let single_day = DateRange::new(date(2024, 1, 8), date(2024, 1, 8));
    let rows = source
        .transactions(&FactQuery::new(single_day, FactFilter::default()))
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].date, date(2024, 1, 8));
}

#[tokio::test]
async fn test_transaction_filters_are_pushed_down() {
    let db = setup_test_db().await;
    let seeded = seed(&db).await;
    let source = SeaOrmFactSource::new(db);

    let filter = FactFilter {
        department_id: Some(DepartmentId::from_uuid(seeded.marketing)),
        transaction_status: Some(facts::TransactionStatus::Pending),
        ..FactFilter::default()
    };
    let rows = source
        .transactions(&FactQuery::new(january(), filter))
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].amount, dec!(650));
}

#[tokio::test]
async fn test_orders_resolve_vendor_and_parent_category() {
    let db = setup_test_db().await;
    let seeded = seed(&db).await;
    let source = SeaOrmFactSource::new(db);

    let rows = source
        .orders(&FactQuery::new(january(), FactFilter::default()))
        .await
        .unwrap();

    assert_eq!(rows.len(), 3);
    let first = &rows[0];
    assert_eq!(first.order_number, "PO-001");
    assert_eq!(first.vendor, "Acme");
    assert_eq!(first.vendor_id, VendorId::from_uuid(seeded.acme));
    assert_eq!(first.category, "Laptops");
    assert_eq!(first.category_id.into_inner(), seeded.laptops);
    assert_eq!(first.parent_category.as_deref(), Some("Hardware"));
    assert_eq!(first.delay_days(), Some(2));
    assert_eq!(rows[1].parent_category, None);
}

#[tokio::test]
async fn test_order_filters_are_pushed_down() {
    let db = setup_test_db().await;
    let seeded = seed(&db).await;
    let source = SeaOrmFactSource::new(db);

    let by_vendor = FactFilter {
        vendor_id: Some(VendorId::from_uuid(seeded.globex)),
        ..FactFilter::default()
    };
    let rows = source
        .orders(&FactQuery::new(january(), by_vendor))
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);

    let urgent = FactFilter {
        priority: Some(FactPriority::Urgent),
        ..FactFilter::default()
    };
    let rows = source
        .orders(&FactQuery::new(january(), urgent))
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].order_number, "PO-002");
}

#[tokio::test]
async fn test_inverted_range_returns_nothing() {
    let db = setup_test_db().await;
    seed(&db).await;
    let source = SeaOrmFactSource::new(db);

    let inverted = DateRange::new(date(2024, 1, 31), date(2024, 1, 1));
    let rows = source
        .orders(&FactQuery::new(inverted, FactFilter::default()))
        .await
        .unwrap();

    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_master_data_is_sorted_by_name() {
    let db = setup_test_db().await;
    seed(&db).await;
    let source = SeaOrmFactSource::new(db);

    let departments = source.departments().await.unwrap();
    let names: Vec<_> = departments.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["Marketing", "Sales"]);
    assert_eq!(departments[0].budget_allocation, dec!(1000));

    let vendors = source.vendors().await.unwrap();
    assert_eq!(vendors[0].name, "Acme");
    assert_eq!(vendors[0].rating, dec!(4.5));
}

#[tokio::test]
async fn test_budgets_filter_by_year_and_department() {
    let db = setup_test_db().await;
    let seeded = seed(&db).await;
    let source = SeaOrmFactSource::new(db);

    let rows = source
        .budgets(&BudgetQuery {
            fiscal_year: Some(2024),
            department_id: Some(DepartmentId::from_uuid(seeded.marketing)),
        })
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].department, "Marketing");
    assert_eq!(rows[0].cost_center, "Campaigns");
    assert_eq!(rows[0].account, "Advertising");

    let other_year = source
        .budgets(&BudgetQuery {
            fiscal_year: Some(2023),
            department_id: None,
        })
        .await
        .unwrap();
    assert!(other_year.is_empty());

    let sales_only = source
        .budgets(&BudgetQuery {
            fiscal_year: None,
            department_id: Some(DepartmentId::from_uuid(seeded.sales)),
        })
        .await
        .unwrap();
    assert!(sales_only.is_empty());
}

#[tokio::test]
async fn test_empty_tables_yield_empty_results() {
    let db = setup_test_db().await;
    let source = SeaOrmFactSource::new(db);

    assert!(
        source
            .transactions(&FactQuery::new(january(), FactFilter::default()))
            .await
            .unwrap()
            .is_empty()
    );
    assert!(source.departments().await.unwrap().is_empty());
    assert!(source.budgets(&BudgetQuery::default()).await.unwrap().is_empty());
}

// ============================================================================
// End-to-end through the query library
// ============================================================================

async fn library() -> (QueryLibrary, Seeded) {
    let db = setup_test_db().await;
    let seeded = seed(&db).await;
    let library = QueryLibrary::new(Arc::new(SeaOrmFactSource::new(db)), QueryCache::new());
    (library, seeded)
}

#[tokio::test]
async fn test_finance_kpis_end_to_end() {
    let (library, _) = library().await;

    let filter = FactFilter {
        transaction_status: Some(facts::TransactionStatus::Completed),
        ..FactFilter::default()
    };
    let kpis = library.finance_kpis(january(), &filter).await.unwrap();

    assert_eq!(kpis.total_revenue, dec!(1000));
    assert_eq!(kpis.total_expenses, dec!(300));
    assert_eq!(kpis.net_income, dec!(700));
}

#[tokio::test]
async fn test_growth_uses_the_previous_window() {
    let (library, _) = library().await;

    let report = library
        .finance_kpis_with_growth(january(), &FactFilter::default())
        .await
        .unwrap();

    assert_eq!(report.previous_range.to, date(2023, 12, 31));
    assert_eq!(report.previous.total_revenue, dec!(400));
    assert_eq!(report.growth_of("revenue_growth"), dec!(600));
}

#[tokio::test]
async fn test_budget_utilization_end_to_end() {
    let (library, _) = library().await;

    let rows = library
        .budget_utilization(Some(2024), &FactFilter::default())
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].utilization_pct, dec!(95));
    assert_eq!(rows[0].remaining_amount, dec!(50));
    assert_eq!(rows[0].budget_status, BudgetStatus::NearLimit);
}

#[tokio::test]
async fn test_procurement_kpis_end_to_end() {
    let (library, _) = library().await;

    let kpis = library
        .procurement_kpis(january(), &FactFilter::default())
        .await
        .unwrap();

    assert_eq!(kpis.order_count, 3);
    assert_eq!(kpis.total_spend, dec!(2000));
    assert_eq!(kpis.pending_order_count, 1);
}
