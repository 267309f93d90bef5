use std::net::SocketAddr;

/// Name of the DuckDB table holding the CSV exactly as read.
pub const RAW_TABLE: &str = "raw_transactions";
/// Name of the DuckDB table holding the derived transaction rows.
pub const TRANSACTIONS_TABLE: &str = "transactions";

pub const COL_TRANSACTION_ID: &str = "transaction_id";
pub const COL_TRANSACTION_DATE: &str = "transaction_date";
pub const COL_TRANSACTION_QTY: &str = "transaction_qty";
pub const COL_UNIT_PRICE: &str = "unit_price";
pub const COL_STORE_LOCATION: &str = "store_location";
pub const COL_PRODUCT_CATEGORY: &str = "product_category";
pub const COL_PRODUCT_TYPE: &str = "product_type";
/// Optional time-of-day column; when present the hour is taken from it.
pub const COL_TRANSACTION_TIME: &str = "transaction_time";

/// Fallback formats for timestamps that are not ISO 8601.
pub const US_TIMESTAMP_FORMATS: &[&str] = &[
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y",
];

/// Weekday names indexed by the derived weekday column (0 = Monday).
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Sales change (percent) beyond which the advisory message is shown.
pub const DEFAULT_ADVISORY_THRESHOLD: f64 = 20.0;

pub const DEFAULT_ADDR: &str = "127.0.0.1:8501";
pub const DEFAULT_MAX_UPLOAD_MB: usize = 200;

pub const UPLOAD_PROMPT: &str = "Please upload a dataset to proceed.";
pub const INCREASE_MESSAGE: &str = "Sales have significantly increased compared to the last month!";
pub const DECREASE_MESSAGE: &str = "Sales have significantly decreased compared to the last month.";
pub const HOVER_CAPTION: &str = "Hover over visuals to see detailed insights.";
pub const INSTRUCTIONS_TEXT: &str = "Use the filters to navigate through months and see how the sales and orders vary by time and location.";
pub const ABOUT_TEXT: &str = "This dashboard provides an interactive way for shop owners to track their coffee shop's sales, identify patterns, and make data-driven decisions.";

/// Runtime settings for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// Maximum accepted upload size in bytes.
    pub max_upload_bytes: usize,
    pub advisory_threshold: f64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8501)),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_MB * 1024 * 1024,
            advisory_threshold: DEFAULT_ADVISORY_THRESHOLD,
        }
    }
}
