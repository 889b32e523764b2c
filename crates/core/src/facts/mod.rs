//! Row-level facts and the data source boundary.
//!
//! Facts are rows from the store with their dimension labels already
//! resolved. Everything above [`FactSource`] works on these rows only.

mod filter;
mod memory;
mod source;
mod types;

pub use filter::{BudgetQuery, FactFilter, FactQuery};
pub use memory::InMemoryFacts;
pub use source::{FactSource, SourceError};
pub use types::{
    AccountType, BudgetFact, DepartmentFact, OrderFact, OrderStatus, Priority, TransactionFact,
    TransactionStatus, TransactionType, UnknownVariant, VendorFact,
};

#[cfg(test)]
pub(crate) mod fixtures;
