use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Transaction: One derived sales row (query result)
// ---------------------------------------------------------------------------

/// A source CSV row together with the columns derived from it at load time.
///
/// Empty CSV cells load as NULL, so the columns copied from the file are
/// optional. Derived calendar columns are always set for rows that belong
/// to a month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// 1-based position of the row in the uploaded file.
    pub source_row: i64,
    pub transaction_id: Option<String>,
    /// `YYYY-MM-DD HH:MM:SS`.
    pub transaction_ts: String,
    pub transaction_qty: Option<f64>,
    pub unit_price: Option<f64>,
    pub store_location: Option<String>,
    pub product_category: Option<String>,
    pub product_type: Option<String>,
    /// `YYYY-MM`.
    pub month_period: String,
    /// 0 = Monday, 6 = Sunday.
    pub weekday: u32,
    pub hour: u32,
    /// `YYYY-MM-DD`.
    pub sale_date: String,
    /// `transaction_qty * unit_price`, NULL when either is.
    pub sales: Option<f64>,
}
