//! Query string parameters shared by the analytics routes.
//!
//! Every value arrives as a string and is parsed here so that a bad value
//! produces a JSON validation error instead of a plain-text rejection.
//! Time-relative defaults are resolved before any query runs, which keeps
//! cache keys explicit.

use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use finsight_core::drilldown::FilterState;
use finsight_core::engine::{Axis, DomainKind};
use finsight_core::facts::{FactFilter, OrderStatus, Priority, TransactionStatus, TransactionType};
use finsight_core::period::Granularity;
use finsight_shared::config::DashboardConfig;
use finsight_shared::{AppError, DateRange};
use serde::Deserialize;

/// Raw query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyticsParams {
    /// First day of the range, `YYYY-MM-DD`.
    pub from: Option<String>,
    /// Last day of the range, `YYYY-MM-DD`.
    pub to: Option<String>,
    /// Department UUID.
    pub department_id: Option<String>,
    /// Cost center UUID.
    pub cost_center_id: Option<String>,
    /// Vendor UUID.
    pub vendor_id: Option<String>,
    /// Category UUID.
    pub category_id: Option<String>,
    /// `Revenue` or `Expense`.
    pub transaction_type: Option<String>,
    /// Transaction or order status, depending on the domain.
    pub status: Option<String>,
    /// Order priority.
    pub priority: Option<String>,
    /// Trend bucket size.
    pub granularity: Option<String>,
    /// Fiscal year for budget lines.
    pub fiscal_year: Option<String>,
    /// Reference date for backlog ages.
    pub as_of: Option<String>,
    /// Drill-down axis.
    pub axis: Option<String>,
    /// Selected department.
    pub department: Option<String>,
    /// Selected month, `YYYY-MM`.
    pub month: Option<String>,
    /// Selected category.
    pub category: Option<String>,
    /// Selected vendor.
    pub vendor: Option<String>,
}

fn parse<T>(name: &str, value: Option<&str>) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| {
            v.parse::<T>()
                .map_err(|e| AppError::Validation(format!("Invalid {name} '{v}': {e}")))
        })
        .transpose()
}

/// Calendar years accepted for date parameters.
const YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

fn parse_date(name: &str, value: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| {
            let date = NaiveDate::parse_from_str(v, "%Y-%m-%d").map_err(|_| {
                AppError::Validation(format!("Invalid {name} '{v}': expected YYYY-MM-DD"))
            })?;
            if YEARS.contains(&date.year()) {
                Ok(date)
            } else {
                Err(AppError::Validation(format!(
                    "Invalid {name} '{v}': year must be between {} and {}",
                    YEARS.start(),
                    YEARS.end()
                )))
            }
        })
        .transpose()
}

impl AnalyticsParams {
    /// Resolves the date range.
    ///
    /// Without `from` and `to` the range is the configured lookback ending
    /// `today`. A lone `to` keeps the lookback length; a lone `from` runs to
    /// `today`. An inverted range is returned as is.
    pub fn range(&self, today: NaiveDate, config: &DashboardConfig) -> Result<DateRange, AppError> {
        let from = parse_date("from", self.from.as_deref())?;
        let to = parse_date("to", self.to.as_deref())?;

        Ok(match (from, to) {
            (Some(from), Some(to)) => DateRange::new(from, to),
            (Some(from), None) => DateRange::new(from, today),
            (None, Some(to)) => DateRange::ending_on(to, config.default_lookback_days),
            (None, None) => DateRange::ending_on(today, config.default_lookback_days),
        })
    }

    /// Builds entity filters. `status` applies to transactions in the
    /// finance domain and to orders in the procurement domain.
    pub fn filter(&self, domain: DomainKind) -> Result<FactFilter, AppError> {
        let status = self.status.as_deref();
        let (transaction_status, order_status) = match domain {
            DomainKind::Finance => (parse::<TransactionStatus>("status", status)?, None),
            DomainKind::Procurement => (None, parse::<OrderStatus>("status", status)?),
        };

        Ok(FactFilter {
            department_id: parse("department_id", self.department_id.as_deref())?,
            cost_center_id: parse("cost_center_id", self.cost_center_id.as_deref())?,
            vendor_id: parse("vendor_id", self.vendor_id.as_deref())?,
            category_id: parse("category_id", self.category_id.as_deref())?,
            transaction_type: parse::<TransactionType>(
                "transaction_type",
                self.transaction_type.as_deref(),
            )?,
            transaction_status,
            order_status,
            priority: parse::<Priority>("priority", self.priority.as_deref())?,
        })
    }

    /// Trend granularity, monthly by default.
    pub fn granularity(&self) -> Result<Granularity, AppError> {
        Ok(parse("granularity", self.granularity.as_deref())?.unwrap_or_default())
    }

    /// Fiscal year, `None` for all years.
    pub fn fiscal_year(&self) -> Result<Option<i32>, AppError> {
        parse("fiscal_year", self.fiscal_year.as_deref())
    }

    /// Reference date for backlog ages, `today` by default.
    pub fn as_of(&self, today: NaiveDate) -> Result<NaiveDate, AppError> {
        Ok(parse_date("as_of", self.as_of.as_deref())?.unwrap_or(today))
    }

    /// Drill-down axis, `department` by default.
    pub fn axis(&self) -> Result<Axis, AppError> {
        Ok(parse("axis", self.axis.as_deref())?.unwrap_or(Axis::Department))
    }

    /// Drill-down selections.
    ///
    /// Selections on other axes are applied first so that a selection on
    /// `axis` itself, when present, is the active one.
    pub fn filter_state(&self) -> Result<FilterState, AppError> {
        let axis = self.axis()?;
        let mut state = FilterState::new();
        let mut own = None;

        for (candidate, value) in [
            (Axis::Department, &self.department),
            (Axis::Month, &self.month),
            (Axis::Category, &self.category),
            (Axis::Vendor, &self.vendor),
        ] {
            let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) else {
                continue;
            };
            if candidate == axis {
                own = Some(value);
            } else {
                state.select(candidate, value);
            }
        }
        if let Some(value) = own {
            state.select(axis, value);
        }

        Ok(state)
    }
}
