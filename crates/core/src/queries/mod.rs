//! Named, parameterized analytics queries.
//!
//! Every query takes an inclusive [`DateRange`](finsight_shared::DateRange)
//! and optional [`FactFilter`](crate::facts::FactFilter)s, and returns typed
//! rows. No matching rows yields an empty table (or an all-zero KPI record).
//! An inverted range yields an empty table without reaching the store.

mod error;
mod finance;
mod library;
mod procurement;
mod rows;


pub use error::AnalyticsError;
pub use library::{AnalyticsResult, QueryLibrary};
pub use rows::{
    BacklogRow, BudgetUtilizationRow, DeliveryRow, DepartmentSummaryRow, FinanceTrendPoint,
    PendingTransactionRow, SpendTrendPoint, VendorPerformanceRow,
};
