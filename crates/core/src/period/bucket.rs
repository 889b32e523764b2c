//! Time buckets for trend queries.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Bucket size for trend queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Calendar day, used by month drill-downs.
    Day,
    /// ISO week.
    Week,
    /// Calendar month.
    #[default]
    Month,
    /// Calendar quarter.
    Quarter,
}

impl Granularity {
    /// Returns the granularity name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
        }
    }

    /// Returns the bucket containing `date`.
    ///
    /// Every date in the same bucket maps to the same label and start.
    #[must_use]
    pub fn bucket(self, date: NaiveDate) -> PeriodBucket {
        match self {
            Self::Day => PeriodBucket {
                start: date,
                label: date.format("%Y-%m-%d").to_string(),
            },
            Self::Week => {
                let iso = date.iso_week();
                let offset = i64::from(date.weekday().num_days_from_monday());
                PeriodBucket {
                    start: date.checked_sub_signed(Duration::days(offset)).unwrap_or(date),
                    label: format!("{}-W{:02}", iso.year(), iso.week()),
                }
            }
            Self::Month => PeriodBucket {
                start: date.with_day(1).unwrap_or(date),
                label: format!("{:04}-{:02}", date.year(), date.month()),
            },
            Self::Quarter => {
                let quarter = (date.month() - 1) / 3 + 1;
                PeriodBucket {
                    start: NaiveDate::from_ymd_opt(date.year(), (quarter - 1) * 3 + 1, 1)
                        .unwrap_or(date),
                    label: format!("{}-Q{quarter}", date.year()),
                }
            }
        }
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "quarter" => Ok(Self::Quarter),
            _ => Err(format!("Unknown granularity: {s}")),
        }
    }
}

/// A labelled period bucket. Orders by start date.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PeriodBucket {
    /// First day of the bucket.
    pub start: NaiveDate,
    /// Display label, e.g. `2024-01`, `2024-Q1`, `2024-W01`.
    pub label: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(Granularity::Month, date(2024, 1, 17), "2024-01", date(2024, 1, 1))]
    #[case(Granularity::Month, date(2024, 12, 31), "2024-12", date(2024, 12, 1))]
    #[case(Granularity::Quarter, date(2024, 2, 29), "2024-Q1", date(2024, 1, 1))]
    #[case(Granularity::Quarter, date(2024, 11, 3), "2024-Q4", date(2024, 10, 1))]
    #[case(Granularity::Week, date(2024, 1, 3), "2024-W01", date(2024, 1, 1))]
    #[case(Granularity::Week, date(2021, 1, 1), "2020-W53", date(2020, 12, 28))]
    #[case(Granularity::Day, date(2024, 1, 5), "2024-01-05", date(2024, 1, 5))]
    fn test_bucket_labels(
        #[case] granularity: Granularity,
        #[case] day: NaiveDate,
        #[case] label: &str,
        #[case] start: NaiveDate,
    ) {
        let bucket = granularity.bucket(day);
        assert_eq!(bucket.label, label);
        assert_eq!(bucket.start, start);
    }

    #[test]
    fn test_bucket_is_stable_within_period() {
        let first = Granularity::Month.bucket(date(2024, 3, 1));
        for day in 2..=31 {
            assert_eq!(Granularity::Month.bucket(date(2024, 3, day)), first);
        }
    }

    #[test]
    fn test_parse_granularity() {
        assert_eq!("Quarter".parse::<Granularity>().unwrap(), Granularity::Quarter);
        assert!("fortnight".parse::<Granularity>().is_err());
    }
}
