//! Drill-down filter state and resolution.
//!
//! Drill paths are at most two levels deep:
//!
//! | Axis | Finance | Procurement |
//! |---|---|---|
//! | department | department → cost center | department → category |
//! | month | month → day | month → day |
//! | category | account type → account | parent category → category |
//! | vendor | unsupported | vendor → order history |

mod resolver;
mod state;

#[cfg(test)]
mod tests;

pub use resolver::{DrillDownResolver, DrillRequest, DrillView, HistoryEntry, resolve_rows};
pub use state::FilterState;
