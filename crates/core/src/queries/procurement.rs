//! Procurement queries.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use finsight_shared::DateRange;
use finsight_shared::types::VendorId;
use rust_decimal::Decimal;

use super::library::{AnalyticsResult, QueryLibrary};
use super::rows::{BacklogRow, DeliveryRow, SpendTrendPoint, VendorPerformanceRow};
use crate::engine::{
    BreakdownRow, Dimension, ProcurementKpis, breakdown, group_by_period, mean, percent_of,
    reportable,
};
use crate::facts::{FactFilter, FactQuery, OrderFact};
use crate::growth::GrowthReport;
use crate::period::Granularity;
use crate::status::DeliveryStatus;

impl QueryLibrary {
    /// Headline procurement KPIs.
    ///
    /// # Errors
    ///
    /// Returns an error if the data source fails.
    pub async fn procurement_kpis(
        &self,
        range: DateRange,
        filter: &FactFilter,
    ) -> AnalyticsResult<ProcurementKpis> {
        const QUERY: &str = "procurement_kpis";
        let params = FactQuery::new(range, filter.clone());
        self.cached(QUERY, &params, || async {
            let rows = self.fetch_orders(QUERY, &params).await?;
            Ok(ProcurementKpis::from_orders(&rows))
        })
        .await
    }

    /// Procurement KPIs for the range and its comparison window, with growth.
    ///
    /// # Errors
    ///
    /// Returns an error if either aggregate fails.
    pub async fn procurement_kpis_with_growth(
        &self,
        range: DateRange,
        filter: &FactFilter,
    ) -> AnalyticsResult<GrowthReport<ProcurementKpis>> {
        self.compare_periods(range, move |r| self.procurement_kpis(r, filter))
            .await
    }

    /// Committed spend grouped by vendor.
    ///
    /// # Errors
    ///
    /// Returns an error if the data source fails.
    pub async fn vendor_breakdown(
        &self,
        range: DateRange,
        filter: &FactFilter,
    ) -> AnalyticsResult<Vec<BreakdownRow>> {
        self.spend_breakdown("vendor_breakdown", range, filter, Dimension::Vendor)
            .await
    }

    /// Committed spend grouped by category.
    ///
    /// # Errors
    ///
    /// Returns an error if the data source fails.
    pub async fn category_breakdown(
        &self,
        range: DateRange,
        filter: &FactFilter,
    ) -> AnalyticsResult<Vec<BreakdownRow>> {
        self.spend_breakdown("category_breakdown", range, filter, Dimension::Category)
            .await
    }

    /// Committed spend grouped by requesting department.
    ///
    /// # Errors
    ///
    /// Returns an error if the data source fails.
    pub async fn procurement_department_breakdown(
        &self,
        range: DateRange,
        filter: &FactFilter,
    ) -> AnalyticsResult<Vec<BreakdownRow>> {
        self.spend_breakdown(
            "procurement_department_breakdown",
            range,
            filter,
            Dimension::Department,
        )
        .await
    }

    /// Committed spend and order count per period bucket, earliest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the data source fails.
    pub async fn spend_trend(
        &self,
        range: DateRange,
        granularity: Granularity,
        filter: &FactFilter,
    ) -> AnalyticsResult<Vec<SpendTrendPoint>> {
        const QUERY: &str = "spend_trend";
        let params = FactQuery::new(range, filter.clone());
        self.cached(QUERY, &(&params, granularity), || async {
            let rows = self.fetch_orders(QUERY, &params).await?;
            Ok(group_by_period(&rows, granularity)
                .into_iter()
                .map(|(bucket, orders)| SpendTrendPoint {
                    period: bucket.label,
                    period_start: bucket.start,
                    spend: orders
                        .iter()
                        .filter(|o| o.status.is_committed())
                        .map(|o| o.grand_total)
                        .sum(),
                    order_count: i64::try_from(orders.len()).unwrap_or(i64::MAX),
                })
                .collect())
        })
        .await
    }

    /// Open orders, most urgent first, then oldest first.
    ///
    /// `days_open` is measured against `as_of`, which the caller resolves.
    ///
    /// # Errors
    ///
    /// Returns an error if the data source fails.
    pub async fn order_backlog(
        &self,
        range: DateRange,
        filter: &FactFilter,
        as_of: NaiveDate,
    ) -> AnalyticsResult<Vec<BacklogRow>> {
        const QUERY: &str = "order_backlog";
        let params = FactQuery::new(range, filter.clone());
        self.cached(QUERY, &(&params, as_of), || async {
            let mut rows: Vec<BacklogRow> = self
                .fetch_orders(QUERY, &params)
                .await?
                .into_iter()
                .filter(|o| o.status.is_open())
                .map(|o| BacklogRow {
                    order_id: o.id,
                    days_open: (as_of - o.order_date).num_days().max(0),
                    order_number: o.order_number,
                    order_date: o.order_date,
                    department: o.department,
                    vendor: o.vendor,
                    status: o.status,
                    priority: o.priority,
                    grand_total: o.grand_total,
                })
                .collect();
            rows.sort_by_key(|row| (Reverse(row.priority), row.order_date));
            Ok(rows)
        })
        .await
    }

    /// Delivery outcome of every order with both expected and actual dates,
    /// worst delay first.
    ///
    /// # Errors
    ///
    /// Returns an error if the data source fails.
    pub async fn delivery_performance(
        &self,
        range: DateRange,
        filter: &FactFilter,
    ) -> AnalyticsResult<Vec<DeliveryRow>> {
        const QUERY: &str = "delivery_performance";
        let params = FactQuery::new(range, filter.clone());
        self.cached(QUERY, &params, || async {
            let mut rows: Vec<DeliveryRow> = self
                .fetch_orders(QUERY, &params)
                .await?
                .into_iter()
                .filter_map(|o| {
                    let expected = o.expected_delivery_date?;
                    let actual = o.actual_delivery_date?;
                    let delay_days = (actual - expected).num_days();
                    Some(DeliveryRow {
                        order_number: o.order_number,
                        vendor: o.vendor,
                        expected_delivery_date: expected,
                        actual_delivery_date: actual,
                        delay_days,
                        delivery_status: DeliveryStatus::from_delay(delay_days),
                    })
                })
                .collect();
            rows.sort_by(|a, b| {
                b.delay_days
                    .cmp(&a.delay_days)
                    .then_with(|| a.order_number.cmp(&b.order_number))
            });
            Ok(rows)
        })
        .await
    }

    /// Scorecard per vendor with committed orders, highest spend first.
    ///
    /// # Errors
    ///
    /// Returns an error if the data source fails.
    pub async fn vendor_performance(
        &self,
        range: DateRange,
        filter: &FactFilter,
    ) -> AnalyticsResult<Vec<VendorPerformanceRow>> {
        const QUERY: &str = "vendor_performance";
        let params = FactQuery::new(range, filter.clone());
        self.cached(QUERY, &params, || async {
            let orders = self.fetch_orders(QUERY, &params).await?;
            if orders.is_empty() {
                return Ok(Vec::new());
            }
            let ratings: HashMap<VendorId, Decimal> = self
                .fetch_vendors(QUERY)
                .await?
                .into_iter()
                .map(|v| (v.id, v.rating))
                .collect();

            let mut by_vendor: BTreeMap<VendorId, Vec<&OrderFact>> = BTreeMap::new();
            for order in reportable(&orders) {
                by_vendor.entry(order.vendor_id).or_default().push(order);
            }

            let mut rows: Vec<VendorPerformanceRow> = by_vendor
                .into_iter()
                .filter_map(|(vendor_id, orders)| {
                    let first = orders.first()?;
                    let delays: Vec<i64> = orders.iter().filter_map(|o| o.delay_days()).collect();
                    let on_time_count = delays
                        .iter()
                        .filter(|d| DeliveryStatus::from_delay(**d).is_on_time())
                        .count();
                    let delivered = i64::try_from(delays.len()).unwrap_or(i64::MAX);
                    let on_time_count = i64::try_from(on_time_count).unwrap_or(i64::MAX);
                    Some(VendorPerformanceRow {
                        vendor_id,
                        vendor: first.vendor.clone(),
                        rating: ratings.get(&vendor_id).copied(),
                        order_count: i64::try_from(orders.len()).unwrap_or(i64::MAX),
                        total_spend: orders.iter().map(|o| o.grand_total).sum(),
                        on_time_count,
                        late_count: delivered - on_time_count,
                        on_time_pct: percent_of(
                            Decimal::from(on_time_count),
                            Decimal::from(delivered),
                        ),
                        avg_delay_days: mean(delays.iter().copied().map(Decimal::from).sum(), delivered),
                    })
                })
                .collect();
            rows.sort_by(|a, b| {
                b.total_spend
                    .cmp(&a.total_spend)
                    .then_with(|| a.vendor.cmp(&b.vendor))
            });
            Ok(rows)
        })
        .await
    }

    async fn spend_breakdown(
        &self,
        query: &'static str,
        range: DateRange,
        filter: &FactFilter,
        dimension: Dimension,
    ) -> AnalyticsResult<Vec<BreakdownRow>> {
        let params = FactQuery::new(range, filter.clone());
        self.cached(query, &params, || async {
            let rows = self.fetch_orders(query, &params).await?;
            Ok(breakdown(reportable(&rows), dimension))
        })
        .await
    }
}
