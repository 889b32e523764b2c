//! Per-widget render outcome.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::queries::AnalyticsResult;

/// Reason shown for a widget whose query returned no rows.
pub const NO_ROWS: &str = "No data for the selected filters";

/// A dashboard widget: either its data or the reason it has none.
///
/// A failed query never shows partial or stale numbers; the widget
/// degrades to `NoData` and the rest of the page still renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Panel<T> {
    /// Data ready to render.
    Ready {
        /// Widget data.
        data: T,
    },
    /// Nothing to render.
    NoData {
        /// Human-readable reason.
        reason: String,
    },
}

impl<T> Panel<T> {
    /// Wraps a query outcome. Failures are logged and become `NoData`.
    pub fn from_result(widget: &'static str, result: AnalyticsResult<T>) -> Self {
        match result {
            Ok(data) => Self::Ready { data },
            Err(e) => {
                warn!(widget, error = %e, "Dashboard widget has no data");
                Self::NoData {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// The data, if ready.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Ready { data } => Some(data),
            Self::NoData { .. } => None,
        }
    }

    /// Returns true if the widget has data.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }
}

impl<R> Panel<Vec<R>> {
    /// Wraps a table query outcome. An empty table becomes `NoData`.
    pub fn from_rows(widget: &'static str, result: AnalyticsResult<Vec<R>>) -> Self {
        match Self::from_result(widget, result) {
            Self::Ready { data } if data.is_empty() => Self::NoData {
                reason: NO_ROWS.to_string(),
            },
            panel => panel,
        }
    }
}
