//! Async session holding the currently uploaded dataset.
//!
//! DuckDB work is synchronous, so every operation runs on Tokio's blocking
//! pool via [`tokio::task::spawn_blocking`], keeping the async event loop
//! free. The session owns the only cross-request state: the dataset from the
//! most recent upload. Selections are never stored; each request carries its
//! own.
//!
//! # Example
//!
//! ```no_run
//! use sales_dashboard::{DashboardSession, SalesDashboard, Selection};
//!
//! #[tokio::main]
//! async fn main() {
//!     let session = DashboardSession::new(SalesDashboard::builder());
//!     session.load_csv_path("coffee_shop_sales.csv".into()).await.unwrap();
//!
//!     let report = session.report(Selection::default()).await.unwrap();
//!     println!("{}", report.period());
//! }
//! ```

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::info;

use crate::error::{DashboardError, Result};
use crate::filter::Selection;
use crate::period::Period;
use crate::report::DashboardReport;
use crate::{SalesDashboard, SalesDashboardBuilder};

// ---------------------------------------------------------------------------
// DashboardSession
// ---------------------------------------------------------------------------

/// Shared handle to the loaded dataset, cheap to clone.
///
/// The [`SalesDashboard`] is protected by a [`Mutex`] since its connection
/// uses `RefCell` internally.
#[derive(Clone)]
pub struct DashboardSession {
    inner: Arc<Mutex<Option<SalesDashboard>>>,
    builder: SalesDashboardBuilder,
}

impl DashboardSession {
    /// Create an empty session; datasets are loaded with `builder`'s settings.
    pub fn new(builder: SalesDashboardBuilder) -> Self {
        Self {
            inner: Arc::new(Mutex::new(None)),
            builder,
        }
    }

    /// Load an uploaded CSV payload, replacing any previous dataset.
    ///
    /// Returns the number of rows loaded. On failure the previous dataset
    /// stays in place.
    pub async fn load_csv_bytes(&self, bytes: Vec<u8>) -> Result<usize> {
        let builder = self.builder;
        let dashboard = spawn(move || builder.load_csv_bytes(&bytes)).await?;
        self.install(dashboard).await
    }

    /// Load a CSV file from disk, replacing any previous dataset.
    pub async fn load_csv_path(&self, path: PathBuf) -> Result<usize> {
        let builder = self.builder;
        let dashboard = spawn(move || builder.load_csv(&path)).await?;
        self.install(dashboard).await
    }

    /// Run a sync dashboard operation on the blocking thread pool.
    ///
    /// Fails with [`DashboardError::NoData`] when nothing has been uploaded.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&SalesDashboard) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let inner = self.inner.clone();
        spawn(move || {
            let guard = inner.lock().map_err(|_| poisoned())?;
            match guard.as_ref() {
                Some(dashboard) => f(dashboard),
                None => Err(DashboardError::NoData),
            }
        })
        .await
    }

    /// Whether a dataset has been loaded.
    pub async fn is_loaded(&self) -> Result<bool> {
        let inner = self.inner.clone();
        spawn(move || Ok(inner.lock().map_err(|_| poisoned())?.is_some())).await
    }

    /// Months present in the loaded dataset.
    pub async fn periods(&self) -> Result<Vec<Period>> {
        self.run(|d| d.periods()).await
    }

    /// Compute the full report for a selection.
    pub async fn report(&self, selection: Selection) -> Result<DashboardReport> {
        self.run(move |d| d.report(&selection)).await
    }

    async fn install(&self, dashboard: SalesDashboard) -> Result<usize> {
        let rows = dashboard.row_count();
        let inner = self.inner.clone();
        spawn(move || {
            // Dropping the old dashboard closes its database
            *inner.lock().map_err(|_| poisoned())? = Some(dashboard);
            Ok(())
        })
        .await?;
        info!(rows, "session dataset replaced");
        Ok(rows)
    }
}

async fn spawn<F, T>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| DashboardError::Internal(format!("Task join error: {e}")))?
}

fn poisoned() -> DashboardError {
    DashboardError::Internal("Session lock poisoned".into())
}
