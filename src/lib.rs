//! Sales dashboard for shop transaction data.
//!
//! Loads a sales-transaction CSV into an in-process DuckDB database, derives
//! per-row calendar and revenue columns, and computes the monthly KPIs and
//! revenue breakdowns shown on the dashboard page.
//!
//! # Quick start
//!
//! ```no_run
//! use sales_dashboard::{SalesDashboard, Selection};
//!
//! let dashboard = SalesDashboard::builder()
//!     .load_csv("coffee_shop_sales.csv")
//!     .unwrap();
//!
//! // Default selection: the first month in the file
//! let report = dashboard.report(&Selection::default()).unwrap();
//! println!("{}: ${:.0}", report.period(), report.kpis.current.total_sales);
//! ```

pub mod charts;
pub mod config;
pub mod connection;
pub mod error;
pub mod filter;
pub mod loader;
pub mod models;
pub mod period;
pub mod queries;
pub mod render;
pub mod report;
#[cfg(feature = "server")]
pub mod server;
#[cfg(feature = "server")]
pub mod session;
pub mod sql_builder;

pub use connection::Connection;
pub use error::{DashboardError, Result};
pub use filter::{PeriodWindow, Selection};
pub use period::Period;
pub use report::DashboardReport;
#[cfg(feature = "server")]
pub use session::DashboardSession;
pub use sql_builder::SqlBuilder;

use std::fmt;
use std::path::Path;

// ---------------------------------------------------------------------------
// SalesDashboardBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and loading a [`SalesDashboard`].
///
/// Use [`SalesDashboard::builder()`] to obtain a builder, chain configuration
/// methods, and finish with [`load_csv`](Self::load_csv) or
/// [`load_csv_bytes`](Self::load_csv_bytes).
#[derive(Debug, Clone, Copy)]
pub struct SalesDashboardBuilder {
    advisory_threshold: f64,
}

impl Default for SalesDashboardBuilder {
    fn default() -> Self {
        Self {
            advisory_threshold: config::DEFAULT_ADVISORY_THRESHOLD,
        }
    }
}

impl SalesDashboardBuilder {
    /// Set the sales change (percent) beyond which an advisory is shown.
    ///
    /// Defaults to 20.
    pub fn advisory_threshold(mut self, threshold: f64) -> Self {
        self.advisory_threshold = threshold;
        self
    }

    /// Load a CSV file from disk.
    pub fn load_csv<P: AsRef<Path>>(self, path: P) -> Result<SalesDashboard> {
        let conn = Connection::open_in_memory()?;
        let rows = loader::load_csv(&conn, path.as_ref())?;
        Ok(self.finish(conn, rows))
    }

    /// Load an uploaded CSV payload.
    pub fn load_csv_bytes(self, bytes: &[u8]) -> Result<SalesDashboard> {
        let conn = Connection::open_in_memory()?;
        let rows = loader::load_csv_bytes(&conn, bytes)?;
        Ok(self.finish(conn, rows))
    }

    fn finish(self, conn: Connection, rows: usize) -> SalesDashboard {
        SalesDashboard {
            conn,
            rows,
            advisory_threshold: self.advisory_threshold,
        }
    }
}

// ---------------------------------------------------------------------------
// SalesDashboard
// ---------------------------------------------------------------------------

/// A loaded sales dataset and the queries that run over it.
///
/// Owns a [`Connection`] to the in-memory database holding the derived
/// `transactions` table and exposes query interfaces as lightweight
/// borrowing wrappers.
#[derive(Debug)]
pub struct SalesDashboard {
    conn: Connection,
    rows: usize,
    advisory_threshold: f64,
}

impl SalesDashboard {
    /// Create a new builder for configuring the dashboard.
    pub fn builder() -> SalesDashboardBuilder {
        SalesDashboardBuilder::default()
    }

    // -- Query accessors ---------------------------------------------------

    /// Access derived transaction rows and the month list.
    pub fn transactions(&self) -> queries::TransactionQuery<'_> {
        queries::TransactionQuery::new(&self.conn)
    }

    /// Access KPI totals and month-over-month comparison.
    pub fn kpis(&self) -> queries::KpiQuery<'_> {
        queries::KpiQuery::new(&self.conn)
    }

    /// Access the grouped revenue breakdowns.
    pub fn breakdowns(&self) -> queries::BreakdownQuery<'_> {
        queries::BreakdownQuery::new(&self.conn)
    }

    // -- Selection and reporting -------------------------------------------

    /// Months present in the data, in order of first appearance.
    pub fn periods(&self) -> Result<Vec<Period>> {
        self.transactions().periods()
    }

    /// The month a fresh selection lands on, `None` for an empty dataset.
    pub fn default_period(&self) -> Result<Option<Period>> {
        Ok(self.periods()?.into_iter().next())
    }

    /// Resolve a selection into the current/previous month window.
    pub fn window(&self, selection: &Selection) -> Result<PeriodWindow> {
        PeriodWindow::resolve(selection, &self.periods()?)
    }

    /// Compute every KPI and breakdown for the selection.
    pub fn report(&self, selection: &Selection) -> Result<DashboardReport> {
        DashboardReport::build(self, selection)
    }

    /// Number of rows loaded.
    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// Sales change (percent) beyond which the report carries an advisory.
    pub fn advisory_threshold(&self) -> f64 {
        self.advisory_threshold
    }

    /// Return a reference to the underlying [`Connection`] for advanced usage.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for SalesDashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SalesDashboard(rows={}, tables=[{}], advisory_threshold={})",
            self.rows,
            self.conn.tables().join(", "),
            self.advisory_threshold
        )
    }
}
