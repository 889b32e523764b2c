//! Dashboard render passes.
//!
//! A render pass runs each widget's query once, in order, and wraps every
//! outcome in a [`Panel`].

mod pages;
mod panel;

pub use pages::{
    DashboardRequest, FinanceDashboard, FinancePage, ProcurementDashboard, ProcurementPage,
};
pub use panel::{NO_ROWS, Panel};
