//! Aggregation engine shared by the finance and procurement domains.
//!
//! [`Domain`] descriptors say which metrics feed growth and which drill
//! paths exist; [`Fact`] lets one set of grouping functions run over both
//! transactions and orders.

mod aggregate;
mod domain;
mod kpi;


pub use aggregate::{
    BreakdownRow, Fact, UNASSIGNED, breakdown, group_by_period, mean, percent_of, reportable,
};
pub use domain::{
    Axis, Dimension, Domain, DomainKind, DrillDetail, DrillPath, FINANCE, GrowthMetric,
    PROCUREMENT,
};
pub use kpi::{FinanceKpis, KpiSet, ProcurementKpis};
