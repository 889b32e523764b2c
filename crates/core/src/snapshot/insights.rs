//! Short textual insights derived from dashboard pages.

use rust_decimal::Decimal;

use crate::dashboard::{FinancePage, Panel, ProcurementPage};
use crate::status::BudgetStatus;

/// Formats an amount as dollars with thousands separators, e.g. `$1,234.50`.
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    let fixed = format!("{:.2}", amount.abs().round_dp(2));
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}${grouped}.{cents}")
}

fn signed_change(label: &str, delta: Decimal) -> String {
    if delta > Decimal::ZERO {
        format!("{label} up {} vs previous period", format_money(delta))
    } else if delta < Decimal::ZERO {
        format!("{label} down {} vs previous period", format_money(delta.abs()))
    } else {
        format!("{label} flat vs previous period")
    }
}

fn unavailable<T>(panel: &Panel<T>, what: &str, out: &mut Vec<String>) {
    if let Panel::NoData { reason } = panel {
        out.push(format!("{what} unavailable: {reason}"));
    }
}

/// Insights for the finance page.
#[must_use]
pub fn finance_insights(page: &FinancePage) -> Vec<String> {
    let mut out = Vec::new();

    match page.kpis.data() {
        Some(report) => {
            let net = report.current.net_income;
            if net >= Decimal::ZERO {
                out.push(format!("Positive net income of {}", format_money(net)));
            } else {
                out.push(format!("Negative net income of {}", format_money(net.abs())));
            }
            out.push(signed_change("Revenue", report.growth_of("revenue_growth")));
            out.push(signed_change("Expenses", report.growth_of("expense_growth")));
        }
        None => unavailable(&page.kpis, "Finance KPIs", &mut out),
    }

    match page.departments.data() {
        Some(rows) => {
            for (status, label) in [
                (BudgetStatus::OverBudget, "over budget"),
                (BudgetStatus::NearLimit, "near budget limit"),
            ] {
                let names: Vec<&str> = rows
                    .iter()
                    .filter(|r| r.budget_status == status)
                    .map(|r| r.department.as_str())
                    .collect();
                if !names.is_empty() {
                    out.push(format!(
                        "{} department(s) {label}: {}",
                        names.len(),
                        names.join(", ")
                    ));
                }
            }
        }
        None => unavailable(&page.departments, "Department summary", &mut out),
    }

    out
}

/// Insights for the procurement page.
#[must_use]
pub fn procurement_insights(page: &ProcurementPage) -> Vec<String> {
    let mut out = Vec::new();

    match page.kpis.data() {
        Some(report) => {
            let kpis = &report.current;
            out.push(format!(
                "{} orders totalling {} in committed spend",
                kpis.order_count,
                format_money(kpis.total_spend)
            ));
            out.push(signed_change("Spend", report.growth_of("spend_growth")));
            if kpis.order_count > 0 {
                out.push(format!(
                    "On-time delivery rate: {:.2}%",
                    kpis.on_time_delivery_pct
                ));
            }
        }
        None => unavailable(&page.kpis, "Procurement KPIs", &mut out),
    }

    match page.top_vendors.data().and_then(|rows| rows.first()) {
        Some(top) => out.push(format!(
            "Top vendor by spend: {} ({})",
            top.key,
            format_money(top.total)
        )),
        None => unavailable(&page.top_vendors, "Vendor ranking", &mut out),
    }

    out
}
