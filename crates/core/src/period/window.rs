//! Comparison windows for period-over-period growth.

use chrono::{Duration, NaiveDate};
use finsight_shared::DateRange;

/// Returns the window of equal length immediately preceding `range`.
///
/// `previous_to = from - 1 day` and `previous_from = from - span`, where
/// `span` counts both ends of `range`. The two windows never overlap.
/// An inverted range yields an inverted (empty) window, and so does a range
/// whose previous window would start before the earliest representable date.
#[must_use]
pub fn comparison_window(range: &DateRange) -> DateRange {
    let span = Duration::days(range.num_days());
    match (
        range.from.checked_sub_signed(span),
        range.from.checked_sub_signed(Duration::days(1)),
    ) {
        (Some(from), Some(to)) => DateRange::new(from, to),
        _ => DateRange::new(NaiveDate::MAX, NaiveDate::MIN),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(date(2024, 2, 1), date(2024, 2, 29), date(2024, 1, 3), date(2024, 1, 31))]
    #[case(date(2024, 1, 1), date(2024, 1, 31), date(2023, 12, 1), date(2023, 12, 31))]
    #[case(date(2024, 3, 10), date(2024, 3, 10), date(2024, 3, 9), date(2024, 3, 9))]
    fn test_comparison_window(
        #[case] from: NaiveDate,
        #[case] to: NaiveDate,
        #[case] prev_from: NaiveDate,
        #[case] prev_to: NaiveDate,
    ) {
        let previous = comparison_window(&DateRange::new(from, to));
        assert_eq!(previous, DateRange::new(prev_from, prev_to));
    }

    #[test]
    fn test_inverted_range_gives_empty_window() {
        let previous = comparison_window(&DateRange::new(date(2024, 2, 1), date(2024, 1, 1)));
        assert!(previous.is_inverted());
    }

    #[rstest]
    #[case(date(-262_000, 1, 1), date(262_000, 12, 31))]
    #[case(NaiveDate::MIN, date(2024, 1, 31))]
    #[case(NaiveDate::MIN, NaiveDate::MIN)]
    fn test_window_before_earliest_date_is_empty(#[case] from: NaiveDate, #[case] to: NaiveDate) {
        let previous = comparison_window(&DateRange::new(from, to));
        assert!(previous.is_inverted());
        assert_eq!(previous.num_days(), 0);
    }

    proptest! {
        #[test]
        fn test_window_is_adjacent_and_equal_length(
            start in 0i64..20_000,
            len in 1i64..400,
        ) {
            let from = date(1990, 1, 1) + Duration::days(start);
            let to = from + Duration::days(len - 1);
            let range = DateRange::new(from, to);
            let previous = comparison_window(&range);

            prop_assert_eq!(previous.to, from - Duration::days(1));
            prop_assert_eq!(previous.num_days(), range.num_days());
            prop_assert!(previous.to < range.from);
        }
    }
}
