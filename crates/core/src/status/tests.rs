//! Boundary and property tests for status classification.

use proptest::prelude::*;
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{BudgetStatus, DeliveryStatus, remaining, utilization_pct};

// ============================================================================
// Utilization
// ============================================================================

#[rstest]
#[case(dec!(0), dec!(0), dec!(0))]
#[case(dec!(50), dec!(100), dec!(50.00))]
#[case(dec!(950), dec!(1000), dec!(95.00))]
#[case(dec!(1), dec!(3), dec!(33.33))]
#[case(dec!(120), dec!(0), dec!(0))]
fn test_utilization_pct(#[case] spent: Decimal, #[case] budget: Decimal, #[case] expected: Decimal) {
    assert_eq!(utilization_pct(spent, budget), expected);
}

#[test]
fn test_remaining_is_not_clamped() {
    assert_eq!(remaining(dec!(1000), dec!(1200)), dec!(-200));
    assert_eq!(remaining(dec!(1000), dec!(250)), dec!(750));
}

// ============================================================================
// Budget status
// ============================================================================

#[rstest]
#[case(dec!(1001), dec!(1000), BudgetStatus::OverBudget)]
#[case(dec!(1000), dec!(1000), BudgetStatus::NearLimit)]
#[case(dec!(950), dec!(1000), BudgetStatus::NearLimit)]
#[case(dec!(900), dec!(1000), BudgetStatus::Moderate)]
#[case(dec!(700.01), dec!(1000), BudgetStatus::Moderate)]
#[case(dec!(700), dec!(1000), BudgetStatus::Low)]
#[case(dec!(0), dec!(1000), BudgetStatus::Low)]
#[case(dec!(0), dec!(0), BudgetStatus::Low)]
#[case(dec!(5), dec!(0), BudgetStatus::OverBudget)]
fn test_budget_status_boundaries(
    #[case] spent: Decimal,
    #[case] budget: Decimal,
    #[case] expected: BudgetStatus,
) {
    assert_eq!(BudgetStatus::classify(spent, budget), expected);
}

#[test]
fn test_budget_status_labels() {
    assert_eq!(BudgetStatus::NearLimit.as_str(), "Near Budget Limit");
    assert_eq!(
        serde_json::to_string(&BudgetStatus::OverBudget).unwrap(),
        "\"Over Budget\""
    );
}

// ============================================================================
// Delivery status
// ============================================================================

#[rstest]
#[case(-5, DeliveryStatus::OnTime)]
#[case(0, DeliveryStatus::OnTime)]
#[case(1, DeliveryStatus::SlightlyLate)]
#[case(3, DeliveryStatus::SlightlyLate)]
#[case(4, DeliveryStatus::Late)]
#[case(7, DeliveryStatus::Late)]
#[case(8, DeliveryStatus::VeryLate)]
#[case(45, DeliveryStatus::VeryLate)]
fn test_delivery_status_boundaries(#[case] delay: i64, #[case] expected: DeliveryStatus) {
    assert_eq!(DeliveryStatus::from_delay(delay), expected);
}

proptest! {
    /// Over Budget is reported exactly when spend exceeds budget.
    #[test]
    fn test_over_budget_iff_spent_exceeds_budget(
        spent in 0i64..10_000_000,
        budget in 0i64..10_000_000,
    ) {
        let status = BudgetStatus::classify(Decimal::from(spent), Decimal::from(budget));
        prop_assert_eq!(status == BudgetStatus::OverBudget, spent > budget);
    }

    /// Utilization is zero-guarded and bounded by 100 while within budget.
    #[test]
    fn test_utilization_within_budget_is_at_most_100(
        budget in 1i64..10_000_000,
        ratio in 0u32..=100,
    ) {
        let budget = Decimal::from(budget);
        let spent = budget * Decimal::from(ratio) / dec!(100);
        let pct = utilization_pct(spent, budget);
        prop_assert!(pct >= Decimal::ZERO);
        prop_assert!(pct <= dec!(100));
    }

    /// Delivery status never improves as the delay grows.
    #[test]
    fn test_delivery_status_is_monotonic(delay in -30i64..60) {
        let rank = |s: DeliveryStatus| match s {
            DeliveryStatus::OnTime => 0,
            DeliveryStatus::SlightlyLate => 1,
            DeliveryStatus::Late => 2,
            DeliveryStatus::VeryLate => 3,
        };
        prop_assert!(rank(DeliveryStatus::from_delay(delay)) <= rank(DeliveryStatus::from_delay(delay + 1)));
    }
}
