//! Headline KPI totals and month-over-month change.

use tracing::debug;

use crate::config::TRANSACTIONS_TABLE;
use crate::error::Result;
use crate::filter::PeriodWindow;
use crate::models::{KpiComparison, Kpis};
use crate::period::Period;
use crate::sql_builder::SqlBuilder;

// ---------------------------------------------------------------------------
// KpiQuery
// ---------------------------------------------------------------------------

/// Query interface for total sales, distinct orders and units sold.
pub struct KpiQuery<'a> {
    conn: &'a crate::connection::Connection,
}

impl<'a> KpiQuery<'a> {
    /// Create a new `KpiQuery` bound to the given connection.
    pub fn new(conn: &'a crate::connection::Connection) -> Self {
        Self { conn }
    }

    /// Totals over the rows of one month. All zero when the month has no rows.
    pub fn totals(&self, period: Period) -> Result<Kpis> {
        let (sql, params) = SqlBuilder::new(TRANSACTIONS_TABLE)
            .select(&[
                "COALESCE(SUM(sales), 0.0::DOUBLE) AS total_sales",
                "COUNT(DISTINCT transaction_id) AS total_orders",
                "COALESCE(SUM(transaction_qty), 0.0::DOUBLE) AS total_quantity",
            ])
            .where_eq("month_period", &period.to_string())
            .build();

        let rows: Vec<Kpis> = self.conn.execute_into(&sql, &params)?;
        Ok(rows.into_iter().next().unwrap_or_default())
    }

    /// Compare the selected month against the calendar month before it.
    ///
    /// A missing previous month counts as all-zero totals, which makes every
    /// change 0 rather than undefined.
    pub fn compare(&self, window: &PeriodWindow) -> Result<KpiComparison> {
        let current = self.totals(window.current)?;
        let previous = match window.previous {
            Some(p) if window.previous_present => self.totals(p)?,
            _ => Kpis::default(),
        };
        debug!(
            period = %window.current,
            previous_present = window.previous_present,
            "computed KPI totals"
        );

        Ok(KpiComparison {
            period: window.current,
            previous_period: window.previous,
            current,
            previous,
            sales_change: percent_change(current.total_sales, previous.total_sales),
            orders_change: percent_change(
                current.total_orders as f64,
                previous.total_orders as f64,
            ),
            quantity_change: percent_change(current.total_quantity, previous.total_quantity),
        })
    }
}

/// `(current - previous) / previous * 100`, or 0 when `previous` is 0.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        0.0
    } else {
        (current - previous) / previous * 100.0
    }
}
