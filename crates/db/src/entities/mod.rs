//! `SeaORM` entities for the reporting tables.
//!
//! The analytics layer only ever reads these tables.

pub mod accounts;
pub mod budgets;
pub mod categories;
pub mod cost_centers;
pub mod departments;
pub mod procurement_orders;
pub mod sea_orm_active_enums;
pub mod transactions;
pub mod vendors;

pub mod prelude {
    //! Entity aliases.

    pub use super::accounts::Entity as Accounts;
    pub use super::budgets::Entity as Budgets;
    pub use super::categories::Entity as Categories;
    pub use super::cost_centers::Entity as CostCenters;
    pub use super::departments::Entity as Departments;
    pub use super::procurement_orders::Entity as ProcurementOrders;
    pub use super::transactions::Entity as Transactions;
    pub use super::vendors::Entity as Vendors;
}
