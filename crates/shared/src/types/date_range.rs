//! Inclusive calendar date ranges.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// An inclusive `from..=to` range of calendar dates.
///
/// A range whose `from` is after its `to` is *inverted*. Inverted ranges are
/// representable on purpose: analytics queries answer them with an empty
/// table instead of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of the range.
    pub from: NaiveDate,
    /// Last day of the range (inclusive).
    pub to: NaiveDate,
}

impl DateRange {
    /// Creates a new range. No ordering check is performed.
    #[must_use]
    pub const fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// Range of `lookback_days` days ending on (and including) `today`.
    ///
    /// The start is clamped to [`NaiveDate::MIN`].
    #[must_use]
    pub fn ending_on(today: NaiveDate, lookback_days: u32) -> Self {
        let span = i64::from(lookback_days.max(1)) - 1;
        Self {
            from: today
                .checked_sub_signed(Duration::days(span))
                .unwrap_or(NaiveDate::MIN),
            to: today,
        }
    }

    /// Returns true when `from` is after `to`.
    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.from > self.to
    }

    /// Number of days covered, counting both ends. Zero for inverted ranges.
    #[must_use]
    pub fn num_days(&self) -> i64 {
        if self.is_inverted() {
            0
        } else {
            (self.to - self.from).num_days() + 1
        }
    }

    /// Returns true if the given date falls within this range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(date(2024, 1, 1), date(2024, 1, 31), 31)]
    #[case(date(2024, 2, 1), date(2024, 2, 29), 29)]
    #[case(date(2024, 3, 5), date(2024, 3, 5), 1)]
    #[case(date(2024, 3, 6), date(2024, 3, 5), 0)]
    fn test_num_days(#[case] from: NaiveDate, #[case] to: NaiveDate, #[case] expected: i64) {
        assert_eq!(DateRange::new(from, to).num_days(), expected);
    }

    #[test]
    fn test_inverted_range() {
        let range = DateRange::new(date(2024, 2, 1), date(2024, 1, 1));
        assert!(range.is_inverted());
        assert!(!range.contains(date(2024, 1, 15)));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31));
        assert!(range.contains(date(2024, 1, 1)));
        assert!(range.contains(date(2024, 1, 31)));
        assert!(!range.contains(date(2024, 2, 1)));
    }

    #[test]
    fn test_ending_on_includes_today() {
        let range = DateRange::ending_on(date(2024, 1, 30), 30);
        assert_eq!(range.from, date(2024, 1, 1));
        assert_eq!(range.to, date(2024, 1, 30));
        assert_eq!(range.num_days(), 30);
    }

    #[test]
    fn test_ending_on_clamps_to_earliest_date() {
        let today = NaiveDate::MIN + Duration::days(1);
        let range = DateRange::ending_on(today, 30);
        assert_eq!(range.from, NaiveDate::MIN);
        assert_eq!(range.to, today);
        assert_eq!(range.num_days(), 2);
    }

    #[test]
    fn test_display() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31));
        assert_eq!(range.to_string(), "2024-01-01..2024-01-31");
    }
}
