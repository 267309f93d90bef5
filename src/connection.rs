//! DuckDB connection wrapper with table registration and query execution.
//!
//! Every loaded dataset gets its own in-memory database, so dropping the
//! [`Connection`] releases the data.

use crate::error::{DashboardError, Result};
use duckdb::{types::ValueRef, Connection as DuckDbConnection};
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;

/// Wraps an in-memory DuckDB connection and tracks the tables created on it.
pub struct Connection {
    conn: DuckDbConnection,
    registered_tables: RefCell<HashSet<String>>,
}

impl Connection {
    /// Open an empty in-memory DuckDB database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = DuckDbConnection::open_in_memory()?;
        Ok(Self {
            conn,
            registered_tables: RefCell::new(HashSet::new()),
        })
    }

    /// Execute SQL and return results as a `Vec` of `HashMap`s.
    ///
    /// Each row is represented as a `HashMap<String, serde_json::Value>`.
    pub fn execute(
        &self,
        sql: &str,
        params: &[String],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        let mut stmt = self.conn.prepare(sql)?;

        let param_values: Vec<&dyn duckdb::ToSql> = params
            .iter()
            .map(|p| p as &dyn duckdb::ToSql)
            .collect();

        let mut rows_result = stmt.query(param_values.as_slice())?;

        // Column metadata is only available once the statement has run
        let executed = rows_result.as_ref().ok_or_else(|| {
            DashboardError::InvalidArgument("statement produced no result set".to_string())
        })?;
        let column_names: Vec<String> = executed
            .column_names()
            .into_iter()
            .map(|s| s.to_string())
            .collect();

        let mut out: Vec<HashMap<String, serde_json::Value>> = Vec::new();

        while let Some(row) = rows_result.next()? {
            let mut map = HashMap::with_capacity(column_names.len());
            for (i, col_name) in column_names.iter().enumerate() {
                map.insert(col_name.clone(), convert_value_ref(row.get_ref(i)?));
            }
            out.push(map);
        }

        Ok(out)
    }

    /// Execute SQL and deserialize each row into type `T`.
    pub fn execute_into<T: DeserializeOwned>(
        &self,
        sql: &str,
        params: &[String],
    ) -> Result<Vec<T>> {
        let rows = self.execute(sql, params)?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            let value = serde_json::Value::Object(row.into_iter().collect());
            results.push(serde_json::from_value(value)?);
        }
        Ok(results)
    }

    /// Execute SQL and return the first column of the first row.
    ///
    /// Returns `None` if the result set is empty.
    pub fn execute_scalar(
        &self,
        sql: &str,
        params: &[String],
    ) -> Result<Option<serde_json::Value>> {
        let mut stmt = self.conn.prepare(sql)?;
        let param_values: Vec<&dyn duckdb::ToSql> = params
            .iter()
            .map(|p| p as &dyn duckdb::ToSql)
            .collect();

        let mut rows = stmt.query(param_values.as_slice())?;

        if let Some(row) = rows.next()? {
            Ok(Some(convert_value_ref(row.get_ref(0)?)))
        } else {
            Ok(None)
        }
    }

    /// Create a DuckDB table from a CSV file with a header row.
    ///
    /// Every column is read as VARCHAR; typing happens when derived columns
    /// are built. A `source_row` column records the 1-based file order.
    pub fn register_table_from_csv(&self, table_name: &str, csv_path: &Path) -> Result<()> {
        let path_sql = sql_path_literal(csv_path);
        self.conn.execute_batch(&format!(
            "DROP TABLE IF EXISTS {table}; \
             CREATE TABLE {table} AS \
             SELECT row_number() OVER () AS source_row, * \
             FROM read_csv({path}, header = true, all_varchar = true)",
            table = table_name,
            path = path_sql
        ))?;
        self.registered_tables
            .borrow_mut()
            .insert(table_name.to_string());
        Ok(())
    }

    /// Create (or replace) a table from a `SELECT` statement.
    pub fn create_table_as(&self, table_name: &str, select_sql: &str) -> Result<()> {
        self.conn.execute_batch(&format!(
            "CREATE OR REPLACE TABLE {} AS {}",
            table_name, select_sql
        ))?;
        self.registered_tables
            .borrow_mut()
            .insert(table_name.to_string());
        Ok(())
    }

    /// Column names of a registered table, in declaration order.
    pub fn column_names(&self, table_name: &str) -> Result<Vec<String>> {
        if !self.has_table(table_name) {
            return Err(DashboardError::NotFound(format!(
                "Unknown table: {}",
                table_name
            )));
        }
        let mut stmt = self.conn.prepare(&format!(
            "SELECT column_name FROM (DESCRIBE {})",
            table_name
        ))?;
        let mut rows = stmt.query([])?;
        let mut cols = Vec::new();
        while let Some(row) = rows.next()? {
            cols.push(row.get::<_, String>(0)?);
        }
        Ok(cols)
    }

    /// Check whether a table has been registered.
    pub fn has_table(&self, name: &str) -> bool {
        self.registered_tables.borrow().contains(name)
    }

    /// Return the names of all registered tables, sorted.
    pub fn tables(&self) -> Vec<String> {
        let mut names: Vec<String> = self.registered_tables.borrow().iter().cloned().collect();
        names.sort();
        names
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("tables", &self.tables())
            .finish()
    }
}

/// Quote a filesystem path as a SQL string literal.
///
/// DuckDB accepts forward slashes on every platform.
fn sql_path_literal(path: &Path) -> String {
    let fwd = path.to_string_lossy().replace('\\', "/");
    format!("'{}'", fwd.replace('\'', "''"))
}

/// Convert a DuckDB `ValueRef` to a `serde_json::Value`.
fn convert_value_ref(val: ValueRef<'_>) -> serde_json::Value {
    match val {
        ValueRef::Null => serde_json::Value::Null,
        ValueRef::Boolean(b) => serde_json::Value::Bool(b),
        ValueRef::TinyInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::SmallInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::Int(n) => serde_json::Value::Number(n.into()),
        ValueRef::BigInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::UTinyInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::USmallInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::UInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::UBigInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::HugeInt(n) => match i64::try_from(n) {
            Ok(i) => serde_json::Value::Number(i.into()),
            Err(_) => serde_json::Value::String(n.to_string()),
        },
        ValueRef::Float(f) => float_value(f64::from(f)),
        ValueRef::Double(f) => float_value(f),
        ValueRef::Decimal(d) => d
            .to_string()
            .parse::<f64>()
            .map(float_value)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Text(bytes) => {
            serde_json::Value::String(String::from_utf8_lossy(bytes).into_owned())
        }
        // Temporal values are formatted in SQL before they reach Rust
        _ => serde_json::Value::Null,
    }
}

fn float_value(f: f64) -> serde_json::Value {
    serde_json::Number::from_f64(f)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}
