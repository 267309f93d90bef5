//! Row-level access to the derived transactions table.

use crate::config::TRANSACTIONS_TABLE;
use crate::error::{DashboardError, Result};
use crate::models::Transaction;
use crate::period::Period;
use crate::sql_builder::SqlBuilder;

// ---------------------------------------------------------------------------
// TransactionQuery
// ---------------------------------------------------------------------------

/// Query interface for derived transaction rows and the months they cover.
pub struct TransactionQuery<'a> {
    conn: &'a crate::connection::Connection,
}

impl<'a> TransactionQuery<'a> {
    /// Create a new `TransactionQuery` bound to the given connection.
    pub fn new(conn: &'a crate::connection::Connection) -> Self {
        Self { conn }
    }

    /// Distinct months in order of first appearance in the file.
    pub fn periods(&self) -> Result<Vec<Period>> {
        let (sql, params) = SqlBuilder::new(TRANSACTIONS_TABLE)
            .select(&["month_period"])
            .where_clause("month_period IS NOT NULL")
            .group_by(&["month_period"])
            .order_by(&["MIN(source_row) ASC"])
            .build();

        let rows = self.conn.execute(&sql, &params)?;
        rows.iter()
            .map(|row| -> Result<Period> {
                row.get("month_period")
                    .and_then(|v| v.as_str())
                    .ok_or_else(|| {
                        DashboardError::InvalidArgument("month_period is not text".to_string())
                    })?
                    .parse()
            })
            .collect()
    }

    /// Rows of one month in file order, optionally capped at `limit`.
    pub fn list(&self, period: Period, limit: Option<usize>) -> Result<Vec<Transaction>> {
        let mut qb = SqlBuilder::new(TRANSACTIONS_TABLE);
        qb.where_eq("month_period", &period.to_string());
        qb.order_by(&["source_row ASC"]);
        if let Some(l) = limit {
            qb.limit(l);
        }

        let (sql, params) = qb.build();
        self.conn.execute_into(&sql, &params)
    }

    /// Total number of derived rows.
    pub fn count(&self) -> Result<usize> {
        let count = self
            .conn
            .execute_scalar(&format!("SELECT COUNT(*) FROM {}", TRANSACTIONS_TABLE), &[])?
            .and_then(|v| v.as_u64())
            .unwrap_or(0);
        Ok(count as usize)
    }
}
