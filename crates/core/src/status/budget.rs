//! Budget utilization and status classification.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::engine::percent_of;

/// Share of budget above which a line is near its limit.
const NEAR_LIMIT_RATIO: Decimal = Decimal::from_parts(9, 0, 0, false, 1);

/// Share of budget above which usage is moderate.
const MODERATE_RATIO: Decimal = Decimal::from_parts(7, 0, 0, false, 1);

/// Budget status, from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BudgetStatus {
    /// Spent more than the budget.
    #[serde(rename = "Over Budget")]
    OverBudget,
    /// Spent more than 90% of the budget.
    #[serde(rename = "Near Budget Limit")]
    NearLimit,
    /// Spent more than 70% of the budget.
    #[serde(rename = "Moderate Usage")]
    Moderate,
    /// Everything else.
    #[serde(rename = "Low Usage")]
    Low,
}

impl BudgetStatus {
    /// Classifies spend against budget. First match wins, all comparisons strict.
    #[must_use]
    pub fn classify(spent: Decimal, budget: Decimal) -> Self {
        if spent > budget {
            Self::OverBudget
        } else if spent > budget * NEAR_LIMIT_RATIO {
            Self::NearLimit
        } else if spent > budget * MODERATE_RATIO {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    /// Display label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OverBudget => "Over Budget",
            Self::NearLimit => "Near Budget Limit",
            Self::Moderate => "Moderate Usage",
            Self::Low => "Low Usage",
        }
    }
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `spent / budget * 100` rounded to 2 places, zero for a zero budget.
#[must_use]
pub fn utilization_pct(spent: Decimal, budget: Decimal) -> Decimal {
    percent_of(spent, budget)
}

/// Budget minus spend. Negative when over budget.
#[must_use]
pub fn remaining(budget: Decimal, spent: Decimal) -> Decimal {
    budget - spent
}
