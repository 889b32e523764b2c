//! Repository abstractions for data access.
//!
//! Repositories hide the `SeaORM` details from the analytics layer, which
//! only sees the [`finsight_core::facts::FactSource`] boundary.

pub mod fact_source;

pub use fact_source::{SeaOrmFactSource, source_error};
