//! Analytics core for Finsight.
//!
//! This crate contains the pure analytics logic with ZERO web or database dependencies.
//! Rows arrive through the [`facts::FactSource`] boundary; everything above it is
//! aggregation, classification and caching.
//!
//! # Modules
//!
//! - `facts` - Row-level facts and the data source boundary
//! - `period` - Comparison windows and period buckets
//! - `engine` - Domain descriptors, breakdowns and KPI sets
//! - `growth` - Period-over-period growth
//! - `status` - Budget and delivery status classification
//! - `cache` - Time-boxed query result cache
//! - `queries` - The named, cached query library
//! - `drilldown` - Filter state and drill-down resolution
//! - `dashboard` - Render passes with per-widget "no data" panels
//! - `snapshot` - Context export for the assistant

pub mod cache;
pub mod dashboard;
pub mod drilldown;
pub mod engine;
pub mod facts;
pub mod growth;
pub mod period;
pub mod queries;
pub mod snapshot;
pub mod status;
