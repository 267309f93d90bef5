//! One complete dashboard computation for a selection.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::filter::{PeriodWindow, Selection};
use crate::models::{Advisory, Breakdown, Heatmap, KpiComparison};
use crate::period::Period;
use crate::SalesDashboard;

/// Everything the page shows for one selected month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardReport {
    /// Months available for selection, in list order.
    pub periods: Vec<Period>,
    pub window: PeriodWindow,
    pub kpis: KpiComparison,
    pub advisory: Advisory,
    pub sales_trend: Breakdown,
    pub weekday_sales: Breakdown,
    pub day_type_sales: Breakdown,
    pub store_sales: Breakdown,
    pub category_sales: Breakdown,
    pub product_type_sales: Breakdown,
    pub heatmap: Heatmap,
}

impl DashboardReport {
    /// Run every aggregate for `selection` from scratch.
    pub fn build(dashboard: &SalesDashboard, selection: &Selection) -> Result<Self> {
        let periods = dashboard.periods()?;
        let window = PeriodWindow::resolve(selection, &periods)?;
        let period = window.current;

        let kpis = dashboard.kpis().compare(&window)?;
        let advisory = Advisory::from_change(kpis.sales_change, dashboard.advisory_threshold());

        let breakdowns = dashboard.breakdowns();
        let report = Self {
            window,
            advisory,
            sales_trend: breakdowns.by_date(period)?,
            weekday_sales: breakdowns.by_weekday(period)?,
            day_type_sales: breakdowns.by_day_type(period)?,
            store_sales: breakdowns.by_store_location(period)?,
            category_sales: breakdowns.by_product_category(period)?,
            product_type_sales: breakdowns.by_product_type(period)?,
            heatmap: breakdowns.weekday_hour(period)?,
            kpis,
            periods,
        };

        info!(
            period = %period,
            total_sales = report.kpis.current.total_sales,
            sales_change = report.kpis.sales_change,
            "built dashboard report"
        );
        Ok(report)
    }

    pub fn period(&self) -> Period {
        self.window.current
    }
}
