//! Delivery status classification.

use serde::{Deserialize, Serialize};

/// Largest delay still reported as slightly late.
const SLIGHTLY_LATE_MAX_DAYS: i64 = 3;

/// Largest delay still reported as late.
const LATE_MAX_DAYS: i64 = 7;

/// Delivery status derived from `actual - expected` in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryStatus {
    /// Delivered on or before the expected date.
    #[serde(rename = "On Time")]
    OnTime,
    /// One to three days late.
    #[serde(rename = "Slightly Late")]
    SlightlyLate,
    /// Four to seven days late.
    #[serde(rename = "Late")]
    Late,
    /// More than a week late.
    #[serde(rename = "Very Late")]
    VeryLate,
}

impl DeliveryStatus {
    /// Classifies a delivery delay.
    #[must_use]
    pub const fn from_delay(delay_days: i64) -> Self {
        if delay_days <= 0 {
            Self::OnTime
        } else if delay_days <= SLIGHTLY_LATE_MAX_DAYS {
            Self::SlightlyLate
        } else if delay_days <= LATE_MAX_DAYS {
            Self::Late
        } else {
            Self::VeryLate
        }
    }

    /// Display label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OnTime => "On Time",
            Self::SlightlyLate => "Slightly Late",
            Self::Late => "Late",
            Self::VeryLate => "Very Late",
        }
    }

    /// Returns true for on-time deliveries.
    #[must_use]
    pub const fn is_on_time(self) -> bool {
        matches!(self, Self::OnTime)
    }
}

impl std::fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
