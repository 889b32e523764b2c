//! Period-over-period growth.
//!
//! Growth is the absolute difference `current - previous` for every metric
//! the domain tracks. It is never expressed as a percentage.

use std::collections::BTreeMap;

use finsight_shared::DateRange;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::engine::KpiSet;
use crate::period::comparison_window;

/// Absolute change from `previous` to `current`. May be negative.
#[must_use]
pub fn growth(current: Decimal, previous: Decimal) -> Decimal {
    current - previous
}

/// KPIs for a range and its comparison window, with per-metric deltas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthReport<K> {
    /// The requested range.
    pub current_range: DateRange,
    /// The window of equal length immediately before it.
    pub previous_range: DateRange,
    /// KPIs for the requested range.
    pub current: K,
    /// KPIs for the comparison window.
    pub previous: K,
    /// Growth column name to absolute delta.
    pub growth: BTreeMap<String, Decimal>,
}

impl<K: KpiSet> GrowthReport<K> {
    /// Builds a report from the two aggregates of the same query.
    #[must_use]
    pub fn compare(current_range: DateRange, current: K, previous: K) -> Self {
        let growth = K::domain()
            .growth_metrics
            .iter()
            .map(|gm| {
                let now = current.metric(gm.metric).unwrap_or_default();
                let before = previous.metric(gm.metric).unwrap_or_default();
                (gm.column.to_string(), self::growth(now, before))
            })
            .collect();

        Self {
            current_range,
            previous_range: comparison_window(&current_range),
            current,
            previous,
            growth,
        }
    }

    /// Delta for a growth column, zero if the column is not tracked.
    #[must_use]
    pub fn growth_of(&self, column: &str) -> Decimal {
        self.growth.get(column).copied().unwrap_or_default()
    }
}
