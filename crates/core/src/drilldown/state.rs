//! Drill-down filter state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::engine::Axis;

/// The user's current drill-down selections.
///
/// Each axis holds at most one selected value; selecting again on the same
/// axis supersedes the old value. The most recently selected axis is active
/// and decides which detail level is shown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    selections: BTreeMap<Axis, String>,
    active: Option<Axis>,
}

impl FilterState {
    /// Creates an empty state showing top-level aggregates.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `value` on `axis` and makes that axis active.
    pub fn select(&mut self, axis: Axis, value: impl Into<String>) {
        self.selections.insert(axis, value.into());
        self.active = Some(axis);
    }

    /// Builder form of [`Self::select`].
    #[must_use]
    pub fn with_selection(mut self, axis: Axis, value: impl Into<String>) -> Self {
        self.select(axis, value);
        self
    }

    /// Clears every selection.
    pub fn reset(&mut self) {
        self.selections.clear();
        self.active = None;
    }

    /// The axis whose detail is shown, `None` at the top level.
    #[must_use]
    pub const fn active(&self) -> Option<Axis> {
        self.active
    }

    /// The value selected on `axis`.
    #[must_use]
    pub fn selection(&self, axis: Axis) -> Option<&str> {
        self.selections.get(&axis).map(String::as_str)
    }

    /// All selections in axis order.
    pub fn selections(&self) -> impl Iterator<Item = (Axis, &str)> {
        self.selections
            .iter()
            .map(|(axis, value)| (*axis, value.as_str()))
    }

    /// Returns true when nothing is selected.
    #[must_use]
    pub fn is_top(&self) -> bool {
        self.selections.is_empty()
    }
}
