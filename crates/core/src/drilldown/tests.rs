//! Drill-down tests.

use std::sync::Arc;

use finsight_shared::DateRange;
use rust_decimal_macros::dec;

use super::*;
use crate::cache::QueryCache;
use crate::engine::{Axis, Dimension, DomainKind, FINANCE, PROCUREMENT};
use crate::facts::fixtures::{date, expense, order, revenue};
use crate::facts::{FactFilter, InMemoryFacts, TransactionFact};
use crate::queries::{AnalyticsError, QueryLibrary};

fn january() -> DateRange {
    DateRange::new(date(2024, 1, 1), date(2024, 1, 31))
}

fn with_cost_center(mut tx: TransactionFact, name: &str) -> TransactionFact {
    tx.cost_center = name.to_string();
    tx
}

fn three_departments() -> Vec<TransactionFact> {
    vec![
        with_cost_center(expense("Finance", dec!(200), date(2024, 1, 3)), "Audit"),
        with_cost_center(expense("Finance", dec!(300), date(2024, 1, 9)), "Treasury"),
        with_cost_center(expense("Finance", dec!(100), date(2024, 1, 12)), "Audit"),
        expense("Sales", dec!(700), date(2024, 1, 5)),
        expense("IT", dec!(400), date(2024, 1, 6)),
    ]
}

// ============================================================================
// FilterState
// ============================================================================

#[test]
fn test_select_supersedes_and_reset_clears() {
    let mut state = FilterState::new();
    state.select(Axis::Department, "Sales");
    state.select(Axis::Department, "Finance");
    state.select(Axis::Month, "2024-01");

    assert_eq!(state.selection(Axis::Department), Some("Finance"));
    assert_eq!(state.active(), Some(Axis::Month));
    assert_eq!(state.selections().count(), 2);

    state.reset();
    assert!(state.is_top());
    assert_eq!(state.active(), None);
    assert_eq!(state, FilterState::new());
}

// ============================================================================
// Pure resolution
// ============================================================================

#[test]
fn test_finance_department_drill_shows_only_selected_department() {
    let rows = three_departments();
    let state = FilterState::new().with_selection(Axis::Department, "Finance");

    let view = resolve_rows(&FINANCE, Axis::Department, &state, &rows).unwrap();

    let DrillView::Breakdown {
        selected,
        dimension,
        rows,
        ..
    } = view
    else {
        panic!("expected a breakdown");
    };
    assert_eq!(selected, "Finance");
    assert_eq!(dimension, Dimension::CostCenter);
    let keys: Vec<_> = rows.iter().map(|r| (r.key.as_str(), r.total)).collect();
    assert_eq!(keys, vec![("Audit", dec!(300)), ("Treasury", dec!(300))]);
}

#[test]
fn test_reset_restores_top_level_exactly() {
    let rows = three_departments();
    let original = resolve_rows(&FINANCE, Axis::Department, &FilterState::new(), &rows).unwrap();

    let mut state = FilterState::new().with_selection(Axis::Department, "Finance");
    let drilled = resolve_rows(&FINANCE, Axis::Department, &state, &rows).unwrap();
    assert_ne!(drilled, original);

    state.reset();
    let restored = resolve_rows(&FINANCE, Axis::Department, &state, &rows).unwrap();
    assert_eq!(restored, original);

    let DrillView::Top { rows: top, .. } = restored else {
        panic!("expected top level");
    };
    assert_eq!(top.len(), 3);
    assert_eq!(top[0].key, "Sales");
}

#[test]
fn test_month_drill_breaks_down_by_day() {
    let rows = vec![
        expense("IT", dec!(10), date(2024, 1, 3)),
        expense("IT", dec!(20), date(2024, 1, 3)),
        expense("IT", dec!(5), date(2024, 2, 1)),
    ];
    let state = FilterState::new().with_selection(Axis::Month, "2024-01");

    let view = resolve_rows(&FINANCE, Axis::Month, &state, &rows).unwrap();

    let DrillView::Breakdown { rows, .. } = view else {
        panic!("expected a breakdown");
    };
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].key, "2024-01-03");
    assert_eq!(rows[0].total, dec!(30));
}

#[test]
fn test_selections_on_several_axes_combine() {
    let rows = vec![
        order("IT", "Acme", "Hardware", dec!(100), date(2024, 1, 3)),
        order("IT", "Acme", "Hardware", dec!(50), date(2024, 2, 3)),
        order("Sales", "Acme", "Hardware", dec!(70), date(2024, 1, 4)),
    ];
    let state = FilterState::new()
        .with_selection(Axis::Department, "IT")
        .with_selection(Axis::Month, "2024-01");

    let view = resolve_rows(&PROCUREMENT, Axis::Department, &state, &rows).unwrap();

    let DrillView::Breakdown { rows, .. } = view else {
        panic!("expected a breakdown");
    };
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].total, dec!(100));
}

#[test]
fn test_vendor_drill_lists_order_history() {
    let rows = vec![
        order("IT", "Acme", "Hardware", dec!(100), date(2024, 1, 3)),
        order("IT", "Acme", "Software", dec!(40), date(2024, 1, 20)),
        order("IT", "Globex", "Hardware", dec!(70), date(2024, 1, 4)),
    ];
    let state = FilterState::new().with_selection(Axis::Vendor, "Acme");

    let view = resolve_rows(&PROCUREMENT, Axis::Vendor, &state, &rows).unwrap();

    let DrillView::History { entries, .. } = view else {
        panic!("expected history");
    };
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].date, date(2024, 1, 20));
    assert_eq!(entries[0].status, "Received");
}

#[test]
fn test_unsupported_axis_is_an_error() {
    let rows = vec![revenue("Sales", dec!(1), date(2024, 1, 1))];

    let err = resolve_rows(&FINANCE, Axis::Vendor, &FilterState::new(), &rows).unwrap_err();

    assert_eq!(
        err,
        AnalyticsError::UnsupportedAxis {
            domain: "finance",
            axis: Axis::Vendor
        }
    );
}

// ============================================================================
// Resolver over the query library
// ============================================================================

#[tokio::test]
async fn test_resolver_uses_cached_rows_and_expense_default() {
    let mut rows = three_departments();
    rows.push(revenue("Finance", dec!(9999), date(2024, 1, 15)));
    let facts = Arc::new(InMemoryFacts::new().with_transactions(rows));
    let resolver = DrillDownResolver::new(QueryLibrary::new(facts.clone(), QueryCache::new()));

    let mut request = DrillRequest {
        domain: DomainKind::Finance,
        range: january(),
        filter: FactFilter::default(),
        axis: Axis::Department,
        state: FilterState::new(),
    };
    let top = resolver.resolve(&request).await.unwrap();
    request.state.select(Axis::Department, "Finance");
    let drilled = resolver.resolve(&request).await.unwrap();
    request.state.reset();
    let restored = resolver.resolve(&request).await.unwrap();

    assert_eq!(top, restored);
    assert_eq!(facts.call_count(), 1);
    let DrillView::Breakdown { rows, .. } = drilled else {
        panic!("expected a breakdown");
    };
    assert_eq!(rows.iter().map(|r| r.total).sum::<rust_decimal::Decimal>(), dec!(600));
}

#[tokio::test]
async fn test_resolver_rejects_unsupported_axis_without_store_access() {
    let facts = Arc::new(InMemoryFacts::new());
    let resolver = DrillDownResolver::new(QueryLibrary::new(facts.clone(), QueryCache::new()));
    let request = DrillRequest {
        domain: DomainKind::Finance,
        range: january(),
        filter: FactFilter::default(),
        axis: Axis::Vendor,
        state: FilterState::new(),
    };

    assert!(resolver.resolve(&request).await.is_err());
    assert_eq!(facts.call_count(), 0);
}
