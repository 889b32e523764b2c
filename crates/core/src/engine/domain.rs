//! Domain descriptors driving the shared aggregation engine.
//!
//! Finance and procurement differ only in which metrics feed growth and
//! which drill paths exist. Both are described here as data.

use serde::{Deserialize, Serialize};

/// A column facts can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// Department name.
    Department,
    /// Cost center name.
    CostCenter,
    /// Account name.
    Account,
    /// Account classification.
    AccountType,
    /// Procurement category.
    Category,
    /// Parent procurement category; top-level categories are their own parent.
    ParentCategory,
    /// Vendor name.
    Vendor,
    /// Revenue or expense.
    TransactionType,
    /// Lifecycle status.
    Status,
    /// Order priority.
    Priority,
    /// Calendar month (`2024-01`).
    Month,
    /// Calendar day (`2024-01-05`).
    Day,
}

impl Dimension {
    /// Column name used in serialized output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Department => "department",
            Self::CostCenter => "cost_center",
            Self::Account => "account",
            Self::AccountType => "account_type",
            Self::Category => "category",
            Self::ParentCategory => "parent_category",
            Self::Vendor => "vendor",
            Self::TransactionType => "transaction_type",
            Self::Status => "status",
            Self::Priority => "priority",
            Self::Month => "month",
            Self::Day => "day",
        }
    }

    /// Returns true for time dimensions, whose breakdowns sort chronologically.
    #[must_use]
    pub const fn is_temporal(self) -> bool {
        matches!(self, Self::Month | Self::Day)
    }
}

/// An axis the user can drill along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Department, then its sub-breakdown.
    Department,
    /// Month, then days.
    Month,
    /// Category, then subcategories.
    Category,
    /// Vendor, then order history.
    Vendor,
}

impl Axis {
    /// All axes.
    pub const ALL: &'static [Self] = &[Self::Department, Self::Month, Self::Category, Self::Vendor];

    /// Returns the axis name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Department => "department",
            Self::Month => "month",
            Self::Category => "category",
            Self::Vendor => "vendor",
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Axis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|axis| axis.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown axis: {s}"))
    }
}

/// What a selected axis value expands into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrillDetail {
    /// Re-aggregate the selected rows by a finer dimension.
    Breakdown(Dimension),
    /// List the selected rows individually, newest first.
    History,
}

/// A two-level drill path along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrillPath {
    /// Axis the path belongs to.
    pub axis: Axis,
    /// Dimension of the top-level aggregate.
    pub top: Dimension,
    /// Detail shown once a value is selected.
    pub detail: DrillDetail,
}

/// A KPI metric tracked for growth, and the column its delta is reported under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthMetric {
    /// Metric name on the KPI set.
    pub metric: &'static str,
    /// Growth column name.
    pub column: &'static str,
}

/// Which fact table a domain aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainKind {
    /// Ledger transactions.
    Finance,
    /// Procurement orders.
    Procurement,
}

impl DomainKind {
    /// Returns the descriptor for this domain.
    #[must_use]
    pub const fn descriptor(self) -> &'static Domain {
        match self {
            Self::Finance => &FINANCE,
            Self::Procurement => &PROCUREMENT,
        }
    }
}

impl std::str::FromStr for DomainKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "finance" => Ok(Self::Finance),
            "procurement" => Ok(Self::Procurement),
            _ => Err(format!("Unknown domain: {s}")),
        }
    }
}

/// Static description of an analytics domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Domain {
    /// Domain name.
    pub name: &'static str,
    /// Fact table aggregated by this domain.
    pub kind: DomainKind,
    /// Metrics compared period over period.
    pub growth_metrics: &'static [GrowthMetric],
    /// Supported drill paths.
    pub drill_paths: &'static [DrillPath],
}

impl Domain {
    /// Returns the drill path for `axis`, if the domain supports it.
    #[must_use]
    pub fn drill_path(&self, axis: Axis) -> Option<&'static DrillPath> {
        self.drill_paths.iter().find(|path| path.axis == axis)
    }
}

/// Finance: revenue and expense transactions.
pub const FINANCE: Domain = Domain {
    name: "finance",
    kind: DomainKind::Finance,
    growth_metrics: &[
        GrowthMetric {
            metric: "total_revenue",
            column: "revenue_growth",
        },
        GrowthMetric {
            metric: "total_expenses",
            column: "expense_growth",
        },
        GrowthMetric {
            metric: "net_income",
            column: "net_income_growth",
        },
        GrowthMetric {
            metric: "transaction_count",
            column: "transaction_count_growth",
        },
    ],
    drill_paths: &[
        DrillPath {
            axis: Axis::Department,
            top: Dimension::Department,
            detail: DrillDetail::Breakdown(Dimension::CostCenter),
        },
        DrillPath {
            axis: Axis::Month,
            top: Dimension::Month,
            detail: DrillDetail::Breakdown(Dimension::Day),
        },
        DrillPath {
            axis: Axis::Category,
            top: Dimension::AccountType,
            detail: DrillDetail::Breakdown(Dimension::Account),
        },
    ],
};

/// Procurement: purchase orders.
pub const PROCUREMENT: Domain = Domain {
    name: "procurement",
    kind: DomainKind::Procurement,
    growth_metrics: &[
        GrowthMetric {
            metric: "order_count",
            column: "order_count_growth",
        },
        GrowthMetric {
            metric: "total_spend",
            column: "spend_growth",
        },
        GrowthMetric {
            metric: "avg_order_value",
            column: "avg_order_value_growth",
        },
    ],
    drill_paths: &[
        DrillPath {
            axis: Axis::Department,
            top: Dimension::Department,
            detail: DrillDetail::Breakdown(Dimension::Category),
        },
        DrillPath {
            axis: Axis::Month,
            top: Dimension::Month,
            detail: DrillDetail::Breakdown(Dimension::Day),
        },
        DrillPath {
            axis: Axis::Category,
            top: Dimension::ParentCategory,
            detail: DrillDetail::Breakdown(Dimension::Category),
        },
        DrillPath {
            axis: Axis::Vendor,
            top: Dimension::Vendor,
            detail: DrillDetail::History,
        },
    ],
};
