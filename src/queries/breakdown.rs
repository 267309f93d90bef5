//! Revenue breakdowns for one month: by date, store, category, product
//! type, weekday and weekday x hour.

use crate::config::{TRANSACTIONS_TABLE, WEEKDAY_NAMES};
use crate::error::Result;
use crate::models::{Breakdown, GroupTotal, Heatmap, HeatmapCell};
use crate::period::Period;
use crate::sql_builder::SqlBuilder;

const SUM_SALES: &str = "COALESCE(SUM(sales), 0.0::DOUBLE) AS value";

// ---------------------------------------------------------------------------
// BreakdownQuery
// ---------------------------------------------------------------------------

/// Query interface for group-by-sum reductions over one month's rows.
pub struct BreakdownQuery<'a> {
    conn: &'a crate::connection::Connection,
}

impl<'a> BreakdownQuery<'a> {
    /// Create a new `BreakdownQuery` bound to the given connection.
    pub fn new(conn: &'a crate::connection::Connection) -> Self {
        Self { conn }
    }

    /// Daily revenue, ordered by date.
    pub fn by_date(&self, period: Period) -> Result<Breakdown> {
        self.grouped(period, "sale_date", &["key ASC"])
    }

    /// Revenue per store location, smallest first.
    pub fn by_store_location(&self, period: Period) -> Result<Breakdown> {
        self.grouped(period, "store_location", &["value ASC", "key ASC"])
    }

    /// Revenue per product category, smallest first.
    pub fn by_product_category(&self, period: Period) -> Result<Breakdown> {
        self.grouped(period, "product_category", &["value ASC", "key ASC"])
    }

    /// Revenue per product type, smallest first.
    pub fn by_product_type(&self, period: Period) -> Result<Breakdown> {
        self.grouped(period, "product_type", &["value ASC", "key ASC"])
    }

    /// Revenue per weekday, keyed by day name, Monday first.
    pub fn by_weekday(&self, period: Period) -> Result<Breakdown> {
        let raw = self.grouped(period, "weekday", &["MIN(weekday) ASC"])?;
        let entries = raw
            .entries
            .into_iter()
            .map(|e| {
                let name = e
                    .key
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| WEEKDAY_NAMES.get(i))
                    .map(|n| n.to_string())
                    .unwrap_or(e.key);
                GroupTotal {
                    key: name,
                    value: e.value,
                }
            })
            .collect();
        Ok(Breakdown::new(entries))
    }

    /// Revenue split between weekdays (Mon-Fri) and the weekend.
    pub fn by_day_type(&self, period: Period) -> Result<Breakdown> {
        self.grouped(
            period,
            "CASE WHEN weekday >= 5 THEN 'Weekend' ELSE 'Weekday' END",
            &["key ASC"],
        )
    }

    /// Weekday x hour revenue grid with missing combinations set to zero.
    pub fn weekday_hour(&self, period: Period) -> Result<Heatmap> {
        let (sql, params) = SqlBuilder::new(TRANSACTIONS_TABLE)
            .select(&["weekday", "hour", SUM_SALES])
            .where_eq("month_period", &period.to_string())
            .group_by(&["weekday", "hour"])
            .order_by(&["weekday ASC", "hour ASC"])
            .build();

        let cells: Vec<HeatmapCell> = self.conn.execute_into(&sql, &params)?;
        Ok(Heatmap::from_cells(&cells))
    }

    /// Sum `sales` grouped by `key_expr`, which becomes the text key.
    ///
    /// Rows whose key is NULL are left out, as a dataframe group-by does.
    fn grouped(&self, period: Period, key_expr: &str, order: &[&str]) -> Result<Breakdown> {
        let key_col = format!("CAST({} AS VARCHAR) AS key", key_expr);
        let (sql, params) = SqlBuilder::new(TRANSACTIONS_TABLE)
            .select(&[key_col.as_str(), SUM_SALES])
            .where_eq("month_period", &period.to_string())
            .where_clause(&format!("{} IS NOT NULL", key_expr))
            .group_by(&[key_expr])
            .order_by(order)
            .build();

        let entries: Vec<GroupTotal> = self.conn.execute_into(&sql, &params)?;
        Ok(Breakdown::new(entries))
    }
}
