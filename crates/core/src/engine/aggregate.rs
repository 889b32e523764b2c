//! Generic grouping and summing over fact rows.

use std::borrow::Cow;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::domain::Dimension;
use crate::facts::{OrderFact, TransactionFact, TransactionStatus};
use crate::period::{Granularity, PeriodBucket};

/// Label used for facts with no value in a dimension.
pub const UNASSIGNED: &str = "Unassigned";

/// A row the engine can group and sum.
pub trait Fact {
    /// Date the fact is bucketed by.
    fn date(&self) -> NaiveDate;

    /// Amount summed by breakdowns.
    fn amount(&self) -> Decimal;

    /// Raw value in a non-temporal dimension, `None` if absent or not applicable.
    fn attribute(&self, dimension: Dimension) -> Option<Cow<'_, str>>;

    /// Short reference for history listings.
    fn reference(&self) -> Cow<'_, str>;

    /// Status label.
    fn status_label(&self) -> &'static str;

    /// Returns true if the fact counts towards aggregates.
    fn is_reportable(&self) -> bool;

    /// Group label in `dimension`, [`UNASSIGNED`] when absent.
    fn label(&self, dimension: Dimension) -> Cow<'_, str> {
        match dimension {
            Dimension::Month => Cow::Owned(Granularity::Month.bucket(self.date()).label),
            Dimension::Day => Cow::Owned(Granularity::Day.bucket(self.date()).label),
            _ => self
                .attribute(dimension)
                .unwrap_or(Cow::Borrowed(UNASSIGNED)),
        }
    }
}

impl Fact for TransactionFact {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn amount(&self) -> Decimal {
        self.amount
    }

    fn attribute(&self, dimension: Dimension) -> Option<Cow<'_, str>> {
        match dimension {
            Dimension::Department => Some(Cow::Borrowed(&self.department)),
            Dimension::CostCenter => Some(Cow::Borrowed(&self.cost_center)),
            Dimension::Account => Some(Cow::Borrowed(&self.account)),
            Dimension::AccountType => Some(Cow::Borrowed(self.account_type.as_str())),
            Dimension::Vendor => self.vendor_name.as_deref().map(Cow::Borrowed),
            Dimension::TransactionType => Some(Cow::Borrowed(self.transaction_type.as_str())),
            Dimension::Status => Some(Cow::Borrowed(self.status.as_str())),
            Dimension::Category
            | Dimension::ParentCategory
            | Dimension::Priority
            | Dimension::Month
            | Dimension::Day => None,
        }
    }

    fn reference(&self) -> Cow<'_, str> {
        match &self.description {
            Some(description) => Cow::Borrowed(description),
            None => Cow::Owned(self.id.to_string()),
        }
    }

    fn status_label(&self) -> &'static str {
        self.status.as_str()
    }

    fn is_reportable(&self) -> bool {
        self.status != TransactionStatus::Rejected
    }
}

impl Fact for OrderFact {
    fn date(&self) -> NaiveDate {
        self.order_date
    }

    fn amount(&self) -> Decimal {
        self.grand_total
    }

    fn attribute(&self, dimension: Dimension) -> Option<Cow<'_, str>> {
        match dimension {
            Dimension::Department => Some(Cow::Borrowed(&self.department)),
            Dimension::CostCenter => Some(Cow::Borrowed(&self.cost_center)),
            Dimension::Vendor => Some(Cow::Borrowed(&self.vendor)),
            Dimension::Category => Some(Cow::Borrowed(&self.category)),
            Dimension::ParentCategory => Some(Cow::Borrowed(
                self.parent_category.as_deref().unwrap_or(&self.category),
            )),
            Dimension::Status => Some(Cow::Borrowed(self.status.as_str())),
            Dimension::Priority => Some(Cow::Borrowed(self.priority.as_str())),
            Dimension::Account
            | Dimension::AccountType
            | Dimension::TransactionType
            | Dimension::Month
            | Dimension::Day => None,
        }
    }

    fn reference(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.order_number)
    }

    fn status_label(&self) -> &'static str {
        self.status.as_str()
    }

    fn is_reportable(&self) -> bool {
        self.status.is_committed()
    }
}

/// `part / whole * 100` rounded to 2 places; zero when `whole` is not positive.
#[must_use]
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole > Decimal::ZERO {
        (part / whole * Decimal::ONE_HUNDRED).round_dp(2)
    } else {
        Decimal::ZERO
    }
}

/// `total / count` rounded to 2 places; zero for an empty set.
#[must_use]
pub fn mean(total: Decimal, count: i64) -> Decimal {
    if count > 0 {
        (total / Decimal::from(count)).round_dp(2)
    } else {
        Decimal::ZERO
    }
}

/// One group of a breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownRow {
    /// Group label.
    pub key: String,
    /// Sum of amounts in the group.
    pub total: Decimal,
    /// Number of facts in the group.
    pub count: i64,
    /// Share of the breakdown's grand total, in percent.
    pub share_pct: Decimal,
}

/// Groups `rows` by `dimension` and sums their amounts.
///
/// Rows are sorted by total descending then key, except temporal dimensions,
/// which sort chronologically.
#[must_use]
pub fn breakdown<'a, F, I>(rows: I, dimension: Dimension) -> Vec<BreakdownRow>
where
    F: Fact + 'a,
    I: IntoIterator<Item = &'a F>,
{
    let mut groups: BTreeMap<String, (Decimal, i64)> = BTreeMap::new();
    for row in rows {
        let entry = groups
            .entry(row.label(dimension).into_owned())
            .or_insert((Decimal::ZERO, 0));
        entry.0 += row.amount();
        entry.1 += 1;
    }

    let grand_total: Decimal = groups.values().map(|(total, _)| *total).sum();

    let mut result: Vec<BreakdownRow> = groups
        .into_iter()
        .map(|(key, (total, count))| BreakdownRow {
            share_pct: percent_of(total, grand_total),
            key,
            total,
            count,
        })
        .collect();

    if !dimension.is_temporal() {
        result.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.key.cmp(&b.key)));
    }
    result
}

/// Facts that count towards aggregates.
pub fn reportable<'a, F: Fact>(rows: &'a [F]) -> impl Iterator<Item = &'a F> {
    rows.iter().filter(|row| row.is_reportable())
}

/// Groups `rows` into period buckets, earliest first.
#[must_use]
pub fn group_by_period<'a, F, I>(rows: I, granularity: Granularity) -> BTreeMap<PeriodBucket, Vec<&'a F>>
where
    F: Fact + 'a,
    I: IntoIterator<Item = &'a F>,
{
    let mut buckets: BTreeMap<PeriodBucket, Vec<&'a F>> = BTreeMap::new();
    for row in rows {
        buckets.entry(granularity.bucket(row.date())).or_default().push(row);
    }
    buckets
}
