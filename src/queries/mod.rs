//! Query modules for the sales dashboard.
//!
//! Each module provides a query struct that borrows from a
//! [`Connection`](crate::connection::Connection) holding a loaded dataset and
//! reads the derived `transactions` table.

pub mod breakdown;
pub mod kpi;
pub mod transactions;

pub use breakdown::BreakdownQuery;
pub use kpi::{percent_change, KpiQuery};
pub use transactions::TransactionQuery;
