//! Fact builders shared by unit tests.

use chrono::NaiveDate;
use finsight_shared::types::{
    AccountId, BudgetId, CategoryId, CostCenterId, DepartmentId, OrderId, TransactionId, VendorId,
};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::types::{
    AccountType, BudgetFact, DepartmentFact, OrderFact, OrderStatus, Priority, TransactionFact,
    TransactionStatus, TransactionType, VendorFact,
};

pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Stable UUID derived from a name so fixtures can refer to each other.
pub(crate) fn uuid_for(name: &str) -> Uuid {
    Uuid::from_u128(
        name.bytes()
            .fold(17u128, |acc, b| acc.wrapping_mul(31).wrapping_add(u128::from(b))),
    )
}

pub(crate) fn department_id(name: &str) -> DepartmentId {
    DepartmentId::from_uuid(uuid_for(name))
}

pub(crate) fn vendor_id(name: &str) -> VendorId {
    VendorId::from_uuid(uuid_for(name))
}

pub(crate) fn category_id(name: &str) -> CategoryId {
    CategoryId::from_uuid(uuid_for(name))
}

pub(crate) fn cost_center_id(name: &str) -> CostCenterId {
    CostCenterId::from_uuid(uuid_for(name))
}

pub(crate) fn transaction(
    department: &str,
    kind: TransactionType,
    amount: Decimal,
    date: NaiveDate,
) -> TransactionFact {
    let cost_center = format!("{department} Core");
    let (account, account_type) = match kind {
        TransactionType::Revenue => ("Sales Revenue", AccountType::Revenue),
        TransactionType::Expense => ("Operating Expenses", AccountType::Expense),
    };
    TransactionFact {
        id: TransactionId::new(),
        date,
        transaction_type: kind,
        status: TransactionStatus::Completed,
        amount,
        department_id: department_id(department),
        department: department.to_string(),
        cost_center_id: cost_center_id(&cost_center),
        cost_center,
        account_id: AccountId::from_uuid(uuid_for(account)),
        account: account.to_string(),
        account_type,
        vendor_name: None,
        payment_method: None,
        description: None,
    }
}

pub(crate) fn revenue(department: &str, amount: Decimal, date: NaiveDate) -> TransactionFact {
    transaction(department, TransactionType::Revenue, amount, date)
}

pub(crate) fn expense(department: &str, amount: Decimal, date: NaiveDate) -> TransactionFact {
    transaction(department, TransactionType::Expense, amount, date)
}

pub(crate) fn order(
    department: &str,
    vendor: &str,
    category: &str,
    total: Decimal,
    date: NaiveDate,
) -> OrderFact {
    let cost_center = format!("{department} Core");
    OrderFact {
        id: OrderId::new(),
        order_number: format!("PO-{}-{}", date.format("%Y%m%d"), Uuid::now_v7().simple()),
        order_date: date,
        department_id: department_id(department),
        department: department.to_string(),
        vendor_id: vendor_id(vendor),
        vendor: vendor.to_string(),
        category_id: category_id(category),
        category: category.to_string(),
        parent_category: None,
        cost_center_id: cost_center_id(&cost_center),
        cost_center,
        subtotal: total,
        tax_amount: Decimal::ZERO,
        shipping_amount: Decimal::ZERO,
        grand_total: total,
        status: OrderStatus::Received,
        priority: Priority::Medium,
        expected_delivery_date: None,
        actual_delivery_date: None,
    }
}

pub(crate) fn department(name: &str, budget_allocation: Decimal) -> DepartmentFact {
    DepartmentFact {
        id: department_id(name),
        name: name.to_string(),
        code: name.chars().take(3).collect::<String>().to_uppercase(),
        manager: None,
        budget_allocation,
    }
}

pub(crate) fn budget(department: &str, budget_amount: Decimal, spent_amount: Decimal) -> BudgetFact {
    BudgetFact {
        id: BudgetId::new(),
        department_id: department_id(department),
        department: department.to_string(),
        cost_center: format!("{department} Core"),
        account: "Operating Expenses".to_string(),
        fiscal_year: 2024,
        budget_amount,
        spent_amount,
        status: "Active".to_string(),
    }
}

pub(crate) fn vendor(name: &str, rating: Decimal) -> VendorFact {
    VendorFact {
        id: vendor_id(name),
        name: name.to_string(),
        code: name.chars().take(4).collect::<String>().to_uppercase(),
        rating,
        credit_limit: Decimal::from(50_000),
        is_active: true,
    }
}
