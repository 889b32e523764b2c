//! Budget and delivery status classification.
//!
//! Thresholds are fixed constants:
//!
//! | Budget status | Rule |
//! |---|---|
//! | Over Budget | spent > budget |
//! | Near Budget Limit | spent > 0.9 × budget |
//! | Moderate Usage | spent > 0.7 × budget |
//! | Low Usage | otherwise |
//!
//! | Delivery status | Delay (days) |
//! |---|---|
//! | On Time | ≤ 0 |
//! | Slightly Late | 1..=3 |
//! | Late | 4..=7 |
//! | Very Late | > 7 |

mod budget;
mod delivery;

#[cfg(test)]
mod tests;

pub use budget::{BudgetStatus, remaining, utilization_pct};
pub use delivery::DeliveryStatus;
