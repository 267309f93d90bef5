//! CSV ingestion and column derivation.
//!
//! The uploaded file is read into [`RAW_TABLE`] with every column as text,
//! then [`TRANSACTIONS_TABLE`] is materialized once with typed and derived
//! columns (`month_period`, `weekday`, `hour`, `sale_date`, `sales`). All
//! later queries read the derived table only.
//!
//! Beyond the columns the derivation references, the input is not
//! validated: a missing column, a non-numeric quantity or an unparseable
//! date fails the load with the underlying DuckDB error.

use std::io::Write;
use std::path::Path;

use tracing::{debug, info};

use crate::config::{
    COL_PRODUCT_CATEGORY, COL_PRODUCT_TYPE, COL_STORE_LOCATION, COL_TRANSACTION_DATE,
    COL_TRANSACTION_ID, COL_TRANSACTION_QTY, COL_TRANSACTION_TIME, COL_UNIT_PRICE, RAW_TABLE,
    TRANSACTIONS_TABLE, US_TIMESTAMP_FORMATS,
};
use crate::connection::Connection;
use crate::error::Result;
use crate::queries::TransactionQuery;

/// Read a CSV file and build the derived transactions table.
///
/// Returns the number of derived rows.
pub fn load_csv(conn: &Connection, path: &Path) -> Result<usize> {
    conn.register_table_from_csv(RAW_TABLE, path)?;

    let columns = conn.column_names(RAW_TABLE)?;
    let has_time = columns.iter().any(|c| c == COL_TRANSACTION_TIME);
    debug!(columns = columns.len(), has_time, "read raw CSV");

    conn.create_table_as(TRANSACTIONS_TABLE, &derived_select_sql(has_time))?;

    let rows = TransactionQuery::new(conn).count()?;
    info!(rows, path = %path.display(), "loaded sales dataset");
    Ok(rows)
}

/// Spool an uploaded payload to a temporary `.csv` file and load it.
///
/// The temporary file is removed once DuckDB has copied the data.
pub fn load_csv_bytes(conn: &Connection, bytes: &[u8]) -> Result<usize> {
    let mut file = tempfile::Builder::new()
        .prefix("sales-upload-")
        .suffix(".csv")
        .tempfile()?;
    file.write_all(bytes)?;
    file.flush()?;
    load_csv(conn, file.path())
}

/// SQL expression turning the text date column into a TIMESTAMP.
///
/// ISO dates and timestamps cast directly; anything else must match one of
/// [`US_TIMESTAMP_FORMATS`] or the load fails. When a separate time column
/// exists it supplies the time of day.
fn timestamp_expr(has_time: bool) -> String {
    let formats = US_TIMESTAMP_FORMATS
        .iter()
        .map(|f| format!("'{}'", f))
        .collect::<Vec<_>>()
        .join(", ");
    let date_ts = format!(
        "CASE WHEN TRY_CAST(\"{col}\" AS TIMESTAMP) IS NOT NULL \
         THEN CAST(\"{col}\" AS TIMESTAMP) \
         ELSE strptime(\"{col}\", [{formats}]) END",
        col = COL_TRANSACTION_DATE,
        formats = formats
    );
    if has_time {
        format!(
            "CAST({} AS DATE) + CAST(\"{}\" AS TIME)",
            date_ts, COL_TRANSACTION_TIME
        )
    } else {
        date_ts
    }
}

fn derived_select_sql(has_time: bool) -> String {
    format!(
        "SELECT \
           source_row, \
           CAST(\"{id}\" AS VARCHAR) AS transaction_id, \
           strftime(ts, '%Y-%m-%d %H:%M:%S') AS transaction_ts, \
           CAST(\"{qty}\" AS DOUBLE) AS transaction_qty, \
           CAST(\"{price}\" AS DOUBLE) AS unit_price, \
           \"{store}\" AS store_location, \
           \"{category}\" AS product_category, \
           \"{ptype}\" AS product_type, \
           strftime(ts, '%Y-%m') AS month_period, \
           CAST(isodow(ts) - 1 AS INTEGER) AS weekday, \
           CAST(hour(ts) AS INTEGER) AS hour, \
           strftime(ts, '%Y-%m-%d') AS sale_date, \
           CAST(\"{qty}\" AS DOUBLE) * CAST(\"{price}\" AS DOUBLE) AS sales \
         FROM (SELECT *, {ts_expr} AS ts FROM {raw}) parsed",
        id = COL_TRANSACTION_ID,
        qty = COL_TRANSACTION_QTY,
        price = COL_UNIT_PRICE,
        store = COL_STORE_LOCATION,
        category = COL_PRODUCT_CATEGORY,
        ptype = COL_PRODUCT_TYPE,
        ts_expr = timestamp_expr(has_time),
        raw = RAW_TABLE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_expr_falls_back_to_us_formats() {
        let expr = timestamp_expr(false);
        assert!(expr.contains("TRY_CAST(\"transaction_date\" AS TIMESTAMP)"));
        assert!(expr.contains("'%m/%d/%Y'"));
        assert!(!expr.contains("transaction_time"));
    }

    #[test]
    fn timestamp_expr_combines_separate_time_column() {
        let expr = timestamp_expr(true);
        assert!(expr.starts_with("CAST(CASE"));
        assert!(expr.ends_with("CAST(\"transaction_time\" AS TIME)"));
    }

    #[test]
    fn derived_sql_reads_raw_table() {
        let sql = derived_select_sql(false);
        assert!(sql.contains("FROM raw_transactions"));
        assert!(sql.contains("AS month_period"));
        assert!(sql.contains("AS sales"));
    }
}
