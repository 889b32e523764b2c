//! Drill-down resolution over row-level facts.

use chrono::NaiveDate;
use finsight_shared::DateRange;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::state::FilterState;
use crate::engine::{
    Axis, BreakdownRow, Dimension, Domain, DomainKind, DrillDetail, DrillPath, Fact, breakdown,
    reportable,
};
use crate::facts::{FactFilter, TransactionType};
use crate::queries::{AnalyticsError, AnalyticsResult, QueryLibrary};

/// What the drill-down shows for the current state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "level", rename_all = "snake_case")]
pub enum DrillView {
    /// Top-level aggregate along an axis.
    Top {
        /// Requested axis.
        axis: Axis,
        /// Grouping dimension.
        dimension: Dimension,
        /// Groups.
        rows: Vec<BreakdownRow>,
    },
    /// The selected value re-aggregated at a finer level.
    Breakdown {
        /// Active axis.
        axis: Axis,
        /// Selected value on the active axis.
        selected: String,
        /// Grouping dimension.
        dimension: Dimension,
        /// Groups.
        rows: Vec<BreakdownRow>,
    },
    /// The selected value's individual facts, newest first.
    History {
        /// Active axis.
        axis: Axis,
        /// Selected value on the active axis.
        selected: String,
        /// Facts.
        entries: Vec<HistoryEntry>,
    },
}

/// One fact in a history listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Fact date.
    pub date: NaiveDate,
    /// Order number or transaction description.
    pub reference: String,
    /// Amount.
    pub amount: Decimal,
    /// Status label.
    pub status: String,
}

fn path_for(domain: &Domain, axis: Axis) -> AnalyticsResult<&'static DrillPath> {
    domain
        .drill_path(axis)
        .ok_or(AnalyticsError::UnsupportedAxis {
            domain: domain.name,
            axis,
        })
}

/// Resolves `state` against already fetched rows.
///
/// With nothing selected, returns the top-level aggregate along `top_axis`.
/// Otherwise keeps the rows matching every selection and expands the active
/// axis one level.
///
/// # Errors
///
/// Returns [`AnalyticsError::UnsupportedAxis`] if `top_axis` or any selected
/// axis has no drill path in `domain`.
pub fn resolve_rows<F: Fact>(
    domain: &Domain,
    top_axis: Axis,
    state: &FilterState,
    rows: &[F],
) -> AnalyticsResult<DrillView> {
    let top_path = path_for(domain, top_axis)?;
    let selections = state
        .selections()
        .map(|(axis, value)| Ok((path_for(domain, axis)?, value)))
        .collect::<AnalyticsResult<Vec<_>>>()?;

    let Some(active) = state.active() else {
        return Ok(DrillView::Top {
            axis: top_axis,
            dimension: top_path.top,
            rows: breakdown(reportable(rows), top_path.top),
        });
    };

    let active_path = path_for(domain, active)?;
    let selected = state.selection(active).unwrap_or_default().to_string();
    let matching: Vec<&F> = reportable(rows)
        .filter(|row| {
            selections
                .iter()
                .all(|(path, value)| row.label(path.top) == *value)
        })
        .collect();

    Ok(match active_path.detail {
        DrillDetail::Breakdown(dimension) => DrillView::Breakdown {
            axis: active,
            selected,
            dimension,
            rows: breakdown(matching, dimension),
        },
        DrillDetail::History => {
            let mut entries: Vec<HistoryEntry> = matching
                .into_iter()
                .map(|row| HistoryEntry {
                    date: row.date(),
                    reference: row.reference().into_owned(),
                    amount: row.amount(),
                    status: row.status_label().to_string(),
                })
                .collect();
            entries.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.reference.cmp(&b.reference)));
            DrillView::History {
                axis: active,
                selected,
                entries,
            }
        }
    })
}

/// A drill-down request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrillRequest {
    /// Domain to drill in.
    pub domain: DomainKind,
    /// Date range of the row-level query.
    pub range: DateRange,
    /// Filters of the row-level query.
    pub filter: FactFilter,
    /// Axis shown when nothing is selected.
    pub axis: Axis,
    /// Current selections.
    pub state: FilterState,
}

/// Runs drill-down requests through the cached row-level queries.
#[derive(Debug, Clone)]
pub struct DrillDownResolver {
    library: QueryLibrary,
}

impl DrillDownResolver {
    /// Creates a resolver over `library`.
    #[must_use]
    pub const fn new(library: QueryLibrary) -> Self {
        Self { library }
    }

    /// Resolves a request.
    ///
    /// Finance drill-downs aggregate expenses unless the filter names a
    /// transaction type. Procurement drill-downs aggregate committed spend.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::UnsupportedAxis`] before touching the store
    /// if an axis is not supported, or a query error if the store fails.
    pub async fn resolve(&self, request: &DrillRequest) -> AnalyticsResult<DrillView> {
        let domain = request.domain.descriptor();
        path_for(domain, request.axis)?;
        for (axis, _) in request.state.selections() {
            path_for(domain, axis)?;
        }

        debug!(
            domain = domain.name,
            axis = %request.axis,
            active = ?request.state.active(),
            "Resolving drill-down"
        );

        match request.domain {
            DomainKind::Finance => {
                let filter = FactFilter {
                    transaction_type: request
                        .filter
                        .transaction_type
                        .or(Some(TransactionType::Expense)),
                    ..request.filter.clone()
                };
                let rows = self.library.transactions(request.range, &filter).await?;
                resolve_rows(domain, request.axis, &request.state, &rows)
            }
            DomainKind::Procurement => {
                let rows = self.library.orders(request.range, &request.filter).await?;
                resolve_rows(domain, request.axis, &request.state, &rows)
            }
        }
    }
}
